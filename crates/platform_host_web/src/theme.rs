//! Theme marker that toggles the `dark` class on the document root element.

use platform_host::ThemeMarker;

/// CSS class applied to `<html>` while dark mode is on.
pub const DARK_THEME_CLASS: &str = "dark";

#[derive(Debug, Clone, Copy, Default)]
/// Browser theme marker backed by `document.documentElement.classList`.
pub struct WebThemeMarker;

impl ThemeMarker for WebThemeMarker {
    fn apply_dark_mode(&self, enabled: bool) {
        #[cfg(target_arch = "wasm32")]
        {
            let Some(root) = web_sys::window()
                .and_then(|window| window.document())
                .and_then(|document| document.document_element())
            else {
                return;
            };
            let classes = root.class_list();
            let _ = if enabled {
                classes.add_1(DARK_THEME_CLASS)
            } else {
                classes.remove_1(DARK_THEME_CLASS)
            };
        }

        #[cfg(not(target_arch = "wasm32"))]
        let _ = enabled;
    }
}
