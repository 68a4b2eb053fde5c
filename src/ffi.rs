//! FFI bindings for the Balance engine
//!
//! C-compatible functions so the app shell can call the synchronous engine
//! operations. Inputs and outputs are JSON in null-terminated C strings.
//! Returned strings are allocated here and must be freed with
//! `balance_free_string`.
//!
//! Remote insight generation is async and is not exposed here; shells call the
//! service themselves and use `balance_default_insights` as the fallback.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;

use serde::Serialize;

use crate::error::EngineError;
use crate::insights::{build_insights_prompt, default_insights};
use crate::scoring::{ScoreEngine, ScoreRequest};
use crate::state::{AppAction, AppState};
use crate::trend::{analyze_trend_data, format_trend_display};
use crate::types::{TrendAnalysis, TrendPeriod, TrendPoint};

// Thread-local storage for the last error message
thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
}

fn set_last_error(msg: &str) {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = CString::new(msg).ok();
    });
}

fn clear_last_error() {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = None;
    });
}

/// Helper to convert C string to Rust string
unsafe fn cstr_to_string(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    CStr::from_ptr(ptr).to_str().ok().map(|s| s.to_string())
}

/// Helper to convert Rust string to C string (caller must free)
fn string_to_cstr(s: &str) -> *mut c_char {
    match CString::new(s) {
        Ok(cstr) => cstr.into_raw(),
        Err(_) => ptr::null_mut(),
    }
}

/// Read a required string argument, recording `name` on failure
unsafe fn required_arg(ptr: *const c_char, name: &str) -> Result<String, EngineError> {
    cstr_to_string(ptr)
        .ok_or_else(|| EngineError::InvalidInput(format!("Invalid {} string pointer", name)))
}

/// Serialize a result for the caller, or record the error and return NULL
fn respond<T: Serialize>(result: Result<T, EngineError>) -> *mut c_char {
    match result.and_then(|value| serde_json::to_string(&value).map_err(EngineError::from)) {
        Ok(json) => string_to_cstr(&json),
        Err(e) => {
            set_last_error(&e.to_string());
            ptr::null_mut()
        }
    }
}

// ============================================================================
// Stateless API
// ============================================================================

/// Compute wellness scores from a `ScoreRequest` JSON object.
///
/// Absent records are substituted with random defaults.
///
/// # Safety
/// - `request_json` must be a valid null-terminated C string.
/// - Returns a newly allocated string that must be freed with `balance_free_string`.
/// - Returns NULL on error; call `balance_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn balance_calculate_wellness_scores(
    request_json: *const c_char,
) -> *mut c_char {
    clear_last_error();

    respond(required_arg(request_json, "request JSON").and_then(|json| {
        let request: ScoreRequest = serde_json::from_str(&json)?;
        Ok(ScoreEngine::new().score_request(&request))
    }))
}

/// Analyze a JSON array of trend points (oldest first).
///
/// `period` is one of `weekly`, `monthly`, `yearly`.
///
/// # Safety
/// - `points_json` and `period` must be valid null-terminated C strings.
/// - Returns a newly allocated string that must be freed with `balance_free_string`.
/// - Returns NULL on error; call `balance_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn balance_analyze_trend(
    points_json: *const c_char,
    period: *const c_char,
) -> *mut c_char {
    clear_last_error();

    let result = required_arg(points_json, "points JSON").and_then(|json| {
        let period: TrendPeriod = required_arg(period, "period")?.parse()?;
        let points: Vec<TrendPoint> = serde_json::from_str(&json)?;
        analyze_trend_data(&points, period)
    });
    respond(result)
}

/// Format a `TrendAnalysis` JSON object as a one-line summary.
///
/// # Safety
/// - `trend_json` must be a valid null-terminated C string.
/// - Returns a newly allocated plain (non-JSON) string that must be freed with
///   `balance_free_string`.
/// - Returns NULL on error; call `balance_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn balance_format_trend_display(trend_json: *const c_char) -> *mut c_char {
    clear_last_error();

    let result = required_arg(trend_json, "trend JSON").and_then(|json| {
        let trend: TrendAnalysis = serde_json::from_str(&json)?;
        Ok(format_trend_display(&trend))
    });

    match result {
        Ok(line) => string_to_cstr(&line),
        Err(e) => {
            set_last_error(&e.to_string());
            ptr::null_mut()
        }
    }
}

/// Rule-based insights for a `TrendAnalysis` JSON object.
///
/// # Safety
/// - `trend_json` must be a valid null-terminated C string.
/// - Returns a newly allocated string that must be freed with `balance_free_string`.
/// - Returns NULL on error; call `balance_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn balance_default_insights(trend_json: *const c_char) -> *mut c_char {
    clear_last_error();

    respond(required_arg(trend_json, "trend JSON").and_then(|json| {
        let trend: TrendAnalysis = serde_json::from_str(&json)?;
        Ok(default_insights(&trend))
    }))
}

/// Build the remote insight prompt, for shells that call the service directly.
///
/// `activities_json` maps activity names to days completed this week.
///
/// # Safety
/// - `trend_json` and `activities_json` must be valid null-terminated C strings.
/// - Returns a newly allocated plain (non-JSON) string that must be freed with
///   `balance_free_string`.
/// - Returns NULL on error; call `balance_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn balance_build_insights_prompt(
    trend_json: *const c_char,
    activities_json: *const c_char,
) -> *mut c_char {
    clear_last_error();

    let result = required_arg(trend_json, "trend JSON").and_then(|json| {
        let trend: TrendAnalysis = serde_json::from_str(&json)?;
        let activities: BTreeMap<String, u8> =
            serde_json::from_str(&required_arg(activities_json, "activities JSON")?)?;
        Ok(build_insights_prompt(&trend, &activities))
    });

    match result {
        Ok(prompt) => string_to_cstr(&prompt),
        Err(e) => {
            set_last_error(&e.to_string());
            ptr::null_mut()
        }
    }
}

/// Apply an `AppAction` to an `AppState` and return the next state.
///
/// A NULL `state_json` starts from the initial state.
///
/// # Safety
/// - `state_json` must be NULL or a valid null-terminated C string.
/// - `action_json` must be a valid null-terminated C string.
/// - Returns a newly allocated string that must be freed with `balance_free_string`.
/// - Returns NULL on error; call `balance_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn balance_apply_action(
    state_json: *const c_char,
    action_json: *const c_char,
) -> *mut c_char {
    clear_last_error();

    let state = if state_json.is_null() {
        Ok(AppState::default())
    } else {
        required_arg(state_json, "state JSON")
            .and_then(|json| serde_json::from_str::<AppState>(&json).map_err(EngineError::from))
    };

    respond(state.and_then(|state| {
        let action: AppAction = serde_json::from_str(&required_arg(action_json, "action JSON")?)?;
        Ok(state.apply(action))
    }))
}

// ============================================================================
// Stateful Engine API
// ============================================================================

/// Opaque handle to a ScoreEngine
pub struct BalanceEngineHandle {
    engine: ScoreEngine,
}

/// Create a new ScoreEngine.
///
/// A non-zero `seed` makes substituted records reproducible; 0 draws from OS
/// entropy.
///
/// # Safety
/// - Returns a pointer to a newly allocated engine.
/// - Must be freed with `balance_engine_free`.
#[no_mangle]
pub unsafe extern "C" fn balance_engine_new(seed: u64) -> *mut BalanceEngineHandle {
    clear_last_error();

    let engine = if seed == 0 {
        ScoreEngine::new()
    } else {
        ScoreEngine::seeded(seed)
    };
    Box::into_raw(Box::new(BalanceEngineHandle { engine }))
}

/// Free a ScoreEngine.
///
/// # Safety
/// - `engine` must be a valid pointer returned by `balance_engine_new`.
/// - After calling this function, the pointer is invalid.
#[no_mangle]
pub unsafe extern "C" fn balance_engine_free(engine: *mut BalanceEngineHandle) {
    if !engine.is_null() {
        drop(Box::from_raw(engine));
    }
}

/// Compute wellness scores with a stateful engine.
///
/// # Safety
/// - `engine` must be a valid pointer returned by `balance_engine_new`.
/// - `request_json` must be a valid null-terminated C string.
/// - Returns a newly allocated string that must be freed with `balance_free_string`.
/// - Returns NULL on error; call `balance_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn balance_engine_score(
    engine: *mut BalanceEngineHandle,
    request_json: *const c_char,
) -> *mut c_char {
    clear_last_error();

    if engine.is_null() {
        set_last_error("Null engine pointer");
        return ptr::null_mut();
    }

    let handle = &mut *engine;

    respond(required_arg(request_json, "request JSON").and_then(|json| {
        let request: ScoreRequest = serde_json::from_str(&json)?;
        Ok(handle.engine.score_request(&request))
    }))
}

// ============================================================================
// Memory Management
// ============================================================================

/// Free a string returned by Balance functions.
///
/// # Safety
/// - `ptr` must be a valid pointer returned by a Balance function, or NULL.
/// - After calling this function, the pointer is invalid.
#[no_mangle]
pub unsafe extern "C" fn balance_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(CString::from_raw(ptr));
    }
}

// ============================================================================
// Error Handling
// ============================================================================

/// Get the last error message.
///
/// # Safety
/// - Returns a pointer to a thread-local error string.
/// - The returned pointer is valid until the next Balance function call on this thread.
/// - Do NOT free the returned pointer.
/// - Returns NULL if no error occurred.
#[no_mangle]
pub unsafe extern "C" fn balance_last_error() -> *const c_char {
    LAST_ERROR.with(|e| match &*e.borrow() {
        Some(cstr) => cstr.as_ptr(),
        None => ptr::null(),
    })
}

// ============================================================================
// Version Information
// ============================================================================

/// Get the Balance engine version.
///
/// # Safety
/// - Returns a pointer to a static string. Do NOT free.
#[no_mangle]
pub unsafe extern "C" fn balance_version() -> *const c_char {
    static VERSION: &[u8] = concat!(env!("CARGO_PKG_VERSION"), "\0").as_bytes();
    VERSION.as_ptr() as *const c_char
}
