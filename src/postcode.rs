use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Matches *most* UK postcodes, a single trailing newline allowed. See
    /// https://en.wikipedia.org/wiki/Postcodes_in_the_United_Kingdom#Validation
    static ref UK_SIMPLE_POSTCODE: Regex =
        Regex::new(r"(?i)^[A-Z]{1,2}[0-9][A-Z0-9]? ?[0-9][A-Z]{2}\n?$")
            .expect("Could not create postcode regex");
}

pub fn is_postcode(text: &str) -> bool {
    UK_SIMPLE_POSTCODE.is_match(text)
}
