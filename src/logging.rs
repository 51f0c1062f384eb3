use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// tracing 구독자를 설치한다. 로그는 stderr로 보내 표준 출력을 결과 전용으로 둔다.
///
/// `RUST_LOG`가 있으면 그대로 쓰고, 없으면 `-v` 횟수로 레벨을 정한다.
pub fn init_tracing(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level(verbosity)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .try_init();
}

fn default_level(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_maps_to_levels() {
        assert_eq!(default_level(0), "warn");
        assert_eq!(default_level(1), "info");
        assert_eq!(default_level(5), "debug");
    }
}
