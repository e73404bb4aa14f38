// Utility functions
// Helper functions for common operations

pub mod dclogin;
#[cfg(target_arch = "wasm32")]
pub mod dom;
pub mod qr;

/// Escape a string for use inside a double-quoted HTML attribute
pub fn escape_attr(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}
