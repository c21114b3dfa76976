//! Draining runtime application logs into the local logging system.

use tracing::Level;

use crate::dispatch::call::CallId;
use crate::protocol::AppLogLine;

/// Map the runtime's numeric severity onto a local level.
///
/// 0 (low) → debug, 1 (none) → info, 3 and 4 (high/highest) → error,
/// everything else → warn.
pub(crate) fn level_for(level: i64) -> Level {
    match level {
        0 => Level::DEBUG,
        1 => Level::INFO,
        3 | 4 => Level::ERROR,
        _ => Level::WARN,
    }
}

/// Re-emit every accumulated app log line through tracing.
pub fn emit_app_logs(call_id: CallId, lines: &[AppLogLine]) {
    for line in lines {
        let level = level_for(line.level);
        if level == Level::DEBUG {
            tracing::debug!(%call_id, timestamp_usec = line.timestamp_usec, "{}", line.message);
        } else if level == Level::INFO {
            tracing::info!(%call_id, timestamp_usec = line.timestamp_usec, "{}", line.message);
        } else if level == Level::ERROR {
            tracing::error!(%call_id, timestamp_usec = line.timestamp_usec, "{}", line.message);
        } else {
            tracing::warn!(%call_id, timestamp_usec = line.timestamp_usec, "{}", line.message);
        }
    }
}
