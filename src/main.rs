use dotenv::dotenv;
use human_panic::setup_panic;
use tracing::{debug, error, warn};

use cssite_collect::config::AppConfig;
use cssite_collect::runtime::lifetime;

#[tokio::main]
async fn main() {
    dotenv().ok();

    let start = chrono::Utc::now();

    // 初始化配置
    setup_panic!();
    if let Err(e) = AppConfig::init() {
        eprintln!("Failed to initialize configuration: {e}");
        std::process::exit(1);
    }
    let config = AppConfig::get();

    // 初始化日志
    let stdout_log = std::io::stdout();
    let (non_blocking_writer, _guard) = tracing_appender::non_blocking(stdout_log);
    let filter = tracing_subscriber::EnvFilter::new(&config.app.log_level);
    let tracing_format = tracing_subscriber::fmt::format()
        .with_level(true)
        .with_ansi(true);

    let tracing_builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(non_blocking_writer)
        .event_format(tracing_format);

    if config.is_development() {
        tracing_builder
            .with_file(true)
            .with_line_number(true)
            .init();
    } else {
        tracing_builder.json().init();
    }

    warn!(
        "Starting {}...
        Project: {}
        Version: {}",
        config.app.system_name,
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
    );

    let context = match lifetime::startup::prepare_startup(config).await {
        Ok(context) => context,
        Err(e) => {
            #[cfg(debug_assertions)]
            eprintln!("{}", e.format_colored());
            error!("Startup failed: {}", e.format_simple());
            std::process::exit(1);
        }
    };

    match context.storage.list_tasks(Default::default()).await {
        Ok(tasks) => warn!(
            "Database ready with {} task(s), media root at {}",
            tasks.len(),
            context.media.root().display()
        ),
        Err(e) => error!("Failed to read tasks: {}", e.format_simple()),
    }

    debug!(
        "Startup completed in {} ms",
        chrono::Utc::now()
            .signed_duration_since(start)
            .num_milliseconds()
    );
}
