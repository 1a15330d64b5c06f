use trailmark_app::AppConfig;

fn main() -> eframe::Result {
    env_logger::init();
    trailmark_app::run(AppConfig::default())
}
