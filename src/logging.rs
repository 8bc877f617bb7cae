//! ログ初期化
//!
//! 標準出力はユーザー向けの結果表示に使うので、ログは標準エラーに出す。
//! `RUST_LOG` があればそちらを優先する。

use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub fn level(verbose: bool) -> Level {
    if verbose {
        Level::DEBUG
    } else {
        Level::WARN
    }
}

pub fn init_logging(verbose: bool) {
    let level = level(verbose);
    let default_filter = format!("florascan={level},florascan_common={level}");

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&default_filter));

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(verbose),
        );

    let _ = subscriber.try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level() {
        assert_eq!(level(true), Level::DEBUG);
        assert_eq!(level(false), Level::WARN);
    }
}
