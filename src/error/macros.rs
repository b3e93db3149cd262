//! # 错误处理宏

/// 按构造函数名快速创建 [`TrackerError`](crate::error::TrackerError)
///
/// ```ignore
/// let err = crate::tracker_err!(validation, "标题不能为空", Some("title".to_string()));
/// let err = crate::tracker_err!(database, "查询错误日志失败: {e}");
/// ```
#[macro_export]
macro_rules! tracker_err {
    (validation, $msg:expr, $field:expr) => {
        $crate::error::TrackerError::validation($msg, $field)
    };
    (validation, $msg:expr) => {
        $crate::error::TrackerError::validation($msg, None)
    };
    (not_found, $resource:expr, $identifier:expr) => {
        $crate::error::TrackerError::not_found($resource, $identifier)
    };
    ($kind:ident, $msg:expr) => {
        $crate::error::TrackerError::$kind($msg)
    };
    ($kind:ident, $fmt:expr, $($arg:tt)*) => {
        $crate::error::TrackerError::$kind(format!($fmt, $($arg)*))
    };
}

/// 确保条件成立，否则返回指定类型的错误
#[macro_export]
macro_rules! tracker_ensure {
    ($cond:expr, validation, $msg:expr, $field:expr) => {
        if !($cond) {
            return Err($crate::tracker_err!(validation, $msg, $field));
        }
    };
    ($cond:expr, $kind:ident, $msg:expr) => {
        if !($cond) {
            return Err($crate::tracker_err!($kind, $msg));
        }
    };
    ($cond:expr, $kind:ident, $fmt:expr, $($arg:tt)*) => {
        if !($cond) {
            return Err($crate::tracker_err!($kind, $fmt, $($arg)*));
        }
    };
}
