//! ログ初期化
//!
//! `GIFTLIST_LOG` でフィルタを指定する（例: `debug`, `giftlist=trace`）。
//! 出力は stderr（stdout は JSON 出力などに使うため汚さない）。

use tracing_subscriber::EnvFilter;

/// フィルタ指定の環境変数
pub const LOG_ENV: &str = "GIFTLIST_LOG";

const DEFAULT_FILTER: &str = "warn";

/// グローバルサブスクライバを設定（2 回目以降は何もしない）
pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(DEFAULT_FILTER))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
