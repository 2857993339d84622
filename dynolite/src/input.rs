//! Live modifier-key state.
//!
//! Reading the keyboard device is a hidden global; the shim goes through the
//! [`InputState`] trait so dispatch can be tested against a fixed fake.

/// Snapshot of the four modifier flags, taken once at invocation start.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModifierState {
    pub alt: bool,
    pub shift: bool,
    pub ctrl: bool,
    pub meta: bool,
}

impl ModifierState {
    pub fn any(&self) -> bool {
        self.alt || self.shift || self.ctrl || self.meta
    }
}

/// Capability for querying the live keyboard state.
pub trait InputState: Send + Sync {
    /// Synchronous, non-blocking snapshot. Never suspends.
    fn modifiers(&self) -> ModifierState;
}

/// Queries the host desktop's keyboard.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemInput;

#[cfg(target_os = "windows")]
impl InputState for SystemInput {
    fn modifiers(&self) -> ModifierState {
        use windows_sys::Win32::UI::Input::KeyboardAndMouse::{
            GetAsyncKeyState, VK_CONTROL, VK_LWIN, VK_MENU, VK_RWIN, VK_SHIFT,
        };

        // High bit set: key is currently down.
        fn down(vk: u16) -> bool {
            (unsafe { GetAsyncKeyState(vk as i32) } as u16) & 0x8000 != 0
        }

        ModifierState {
            alt: down(VK_MENU),
            shift: down(VK_SHIFT),
            ctrl: down(VK_CONTROL),
            meta: down(VK_LWIN) || down(VK_RWIN),
        }
    }
}

#[cfg(not(target_os = "windows"))]
impl InputState for SystemInput {
    /// There is no portable live-keyboard query off Windows. Reporting
    /// nothing held degrades every click to the plain launch path.
    fn modifiers(&self) -> ModifierState {
        ModifierState::default()
    }
}
