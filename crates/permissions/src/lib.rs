//! macOS Accessibility permission checks for H9.
//!
//! Two entry points: [`accessibility_ok`] asks the system whether the process
//! is trusted, and [`accessibility_ok_with_prompt`] does the same but lets
//! macOS show its "grant access" dialog when the process is not yet trusted.
//! The prompt is owned by the OS; the returned value reflects the state at
//! call time and does not wait for the user to answer.
//!
//! On platforms other than macOS both functions report `false`.

/// Accessibility framework bindings.
#[cfg(target_os = "macos")]
mod sys {
    use std::ffi::c_void;

    use core_foundation::{
        base::TCFType, boolean::CFBoolean, dictionary::CFDictionary, string::CFString,
    };

    #[link(name = "ApplicationServices", kind = "framework")]
    unsafe extern "C" {
        fn AXIsProcessTrusted() -> bool;
        fn AXIsProcessTrustedWithOptions(options: *const c_void) -> bool;
    }

    /// Dictionary key understood by `AXIsProcessTrustedWithOptions`.
    const TRUSTED_CHECK_OPTION_PROMPT: &str = "AXTrustedCheckOptionPrompt";

    /// `AXIsProcessTrusted`.
    pub(crate) fn trusted() -> bool {
        unsafe { AXIsProcessTrusted() }
    }

    /// `AXIsProcessTrustedWithOptions` with the prompt option set.
    pub(crate) fn trusted_with_prompt() -> bool {
        let key = CFString::new(TRUSTED_CHECK_OPTION_PROMPT);
        let value = CFBoolean::true_value();
        let options = CFDictionary::from_CFType_pairs(&[(key.as_CFType(), value.as_CFType())]);
        unsafe { AXIsProcessTrustedWithOptions(options.as_concrete_TypeRef().cast()) }
    }
}

/// Fallback for platforms without the Accessibility framework.
#[cfg(not(target_os = "macos"))]
mod sys {
    pub(crate) fn trusted() -> bool {
        false
    }

    pub(crate) fn trusted_with_prompt() -> bool {
        false
    }
}

/// Check whether the process holds the Accessibility permission.
///
/// Never prompts.
pub fn accessibility_ok() -> bool {
    let ok = sys::trusted();
    tracing::trace!(ok, "accessibility check");
    ok
}

/// Check the Accessibility permission, asking macOS to prompt the user when
/// it is missing.
pub fn accessibility_ok_with_prompt() -> bool {
    let ok = sys::trusted_with_prompt();
    if ok {
        tracing::info!("accessibility is enabled");
    } else {
        tracing::warn!("accessibility is not enabled; grant it in System Settings");
    }
    ok
}
