use actix_web::web;

pub mod addresses;

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/addresses", web::get().to(addresses::addresses));
}
