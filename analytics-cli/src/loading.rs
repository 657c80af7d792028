use std::future::Future;
use std::io::Write;
use std::time::Duration;

use analytics_client::{AnalyticsApi, AnalyticsViewModel};

/// Быстрые ответы завершаются раньше, и индикатор не мигает.
pub(crate) const LOADING_HINT_DELAY: Duration = Duration::from_millis(150);
pub(crate) const LOADING_TEXT: &str = "Загрузка...";

/// Выполняет загрузку и пишет индикатор в `out`, если через
/// `LOADING_HINT_DELAY` view-model всё ещё занята.
pub(crate) async fn with_loading_hint<A, F>(
    vm: &AnalyticsViewModel<A>,
    load: F,
    out: &mut impl Write,
) where
    A: AnalyticsApi,
    F: Future<Output = ()>,
{
    tokio::pin!(load);
    tokio::select! {
        _ = &mut load => return,
        _ = tokio::time::sleep(LOADING_HINT_DELAY) => {}
    }

    if vm.is_loading() {
        let _ = writeln!(out, "{LOADING_TEXT}");
    }
    load.await;
}
