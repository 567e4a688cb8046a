/// Dictionary key of an annotation's default appearance string.
pub const DEFAULT_APPEARANCE_KEY: &str = "DA";

/// The engine's annotation string-attribute setter.
pub trait StringAttributeSink {
    /// Sets the string attribute `key` to `value`.
    ///
    /// `value` is UTF-16 and NUL-terminated, the wide-string form the engine
    /// takes for text attributes. Returns the engine's success flag.
    fn set_string_value(&mut self, key: &str, value: &[u16]) -> bool;
}

impl<T: StringAttributeSink + ?Sized> StringAttributeSink for &mut T {
    fn set_string_value(&mut self, key: &str, value: &[u16]) -> bool {
        (**self).set_string_value(key, value)
    }
}
