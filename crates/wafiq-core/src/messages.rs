//! Localized user-facing strings (Arabic).

/// Default application name.
pub const APP_NAME: &str = "وفيق أورثو - العلاج النطقي للأطفال";

/// Confirmation returned after progress is reset.
pub const PROGRESS_RESET: &str = "تم إعادة تعيين التقدم بنجاح";

/// Generic message returned with every failure response.
pub const SERVER_ERROR: &str = "حدث خطأ في الخادم";

/// Detail used when a failure carries no message of its own.
pub const REQUEST_FAILED: &str = "حدث خطأ أثناء معالجة طلبك";
