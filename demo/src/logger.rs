use apollo_application::ShellConfig;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// 初始化日志：`RUST_LOG` 优先，其次是配置文件中的过滤器；
/// `--verbose` 额外打开 apollo 各 crate 的 trace 级别。
pub fn init(config: &ShellConfig, verbose: bool) {
    let fallback = if verbose {
        format!("apollo_core=trace,apollo_application=trace,{}", config.log_filter)
    } else {
        config.log_filter.clone()
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    // profiling 打开时在 span 关闭时输出耗时（每次命令调用一个 span）
    let spans = if config.profiling {
        FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_span_events(spans)
                .compact(),
        )
        .init();
}
