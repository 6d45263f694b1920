//! Small crate-internal helpers

/// Shortens a fully qualified type name for use in failure messages,
/// keeping generic structure: `alloc::string::String` becomes `String`,
/// `Vec<core::option::Option<i32>>` becomes `Vec<Option<i32>>`.
pub(crate) fn short_type_name<T: ?Sized>() -> String {
    shorten(std::any::type_name::<T>())
}

fn shorten(full: &str) -> String {
    let mut out = String::with_capacity(full.len());
    let mut segment = String::new();
    for c in full.chars() {
        if c.is_alphanumeric() || c == '_' {
            segment.push(c);
        } else if c == ':' {
            segment.clear();
        } else {
            out.push_str(&segment);
            segment.clear();
            out.push(c);
        }
    }
    out.push_str(&segment);
    out
}
