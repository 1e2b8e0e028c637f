use crate::api::attendance;
use actix_governor::{
    Governor, GovernorConfig, GovernorConfigBuilder, PeerIpKeyExtractor,
    governor::middleware::NoOpMiddleware,
};
use actix_web::web;
use anyhow::{Context, Result};

pub type RateLimit = GovernorConfig<PeerIpKeyExtractor, NoOpMiddleware>;

/// Per-peer-IP limiter allowing `requests_per_min` with the same burst size
pub fn rate_limit(requests_per_min: u32) -> Result<RateLimit> {
    let per_ms = if requests_per_min == 0 {
        1
    } else {
        (60_000 / requests_per_min as u64).max(1)
    };

    GovernorConfigBuilder::default()
        .per_millisecond(per_ms)
        .burst_size(requests_per_min.max(1))
        .key_extractor(PeerIpKeyExtractor)
        .finish()
        .context("invalid rate limit settings")
}

pub fn configure(cfg: &mut web::ServiceConfig, api_prefix: &str, rate_limit: &RateLimit) {
    cfg.service(
        web::scope(api_prefix)
            .wrap(Governor::new(rate_limit))
            .configure(attendance_routes),
    );
}

pub fn attendance_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/attendance")
            // /attendance
            .service(web::resource("").route(web::get().to(attendance::all_users_attendance)))
            // /attendance/{user_id}
            .service(web::resource("/{user_id}").route(web::get().to(attendance::all_attendance)))
            // /attendance/{user_id}/today
            .service(
                web::resource("/{user_id}/today")
                    .route(web::get().to(attendance::today_attendance)),
            )
            // /attendance/{user_id}/checkin
            .service(
                web::resource("/{user_id}/checkin").route(web::post().to(attendance::check_in)),
            )
            // /attendance/{user_id}/checkout
            .service(
                web::resource("/{user_id}/checkout").route(web::post().to(attendance::check_out)),
            ),
    );
}
