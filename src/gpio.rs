//! GPIO command encoding.
//!
//! Folds a comma-separated argument such as `04,17,25` into one compound
//! command token (`SET_GPIO_04--SET_GPIO_17--SET_GPIO_25`) that the device
//! service accepts as a single path segment.
//!
//! Decoded elements are not checked against any pin set. The device service
//! is trusted to reject pins it does not drive.

/// Separator between elements of the chat argument.
const ELEMENT_SEPARATOR: char = ',';

/// Delimiter between operations in a compound command token.
pub const OPERATION_DELIMITER: &str = "--";

/// Pin operation requested by a chat command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GpioAction {
    /// Drive the pin high (`on`).
    Set,
    /// Drive the pin low (`off`).
    Reset,
}

impl GpioAction {
    /// Operation-name prefix understood by the device service.
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Set => "SET_GPIO_",
            Self::Reset => "RESET_GPIO_",
        }
    }

    /// Chat command name that triggers this action.
    pub fn command(self) -> &'static str {
        match self {
            Self::Set => "on",
            Self::Reset => "off",
        }
    }

    /// Encode `argument` into a compound token for this action.
    pub fn encode(self, argument: &str) -> String {
        encode(argument, self.prefix())
    }
}

/// Decode one element: `+` becomes a space, then escapes are resolved by
/// [`unescape`].
pub fn decode_element(element: &str) -> String {
    unescape(&element.replace('+', " "))
}

/// Resolve `%XX` and `%uXXXX` escapes.
///
/// `%XX` names the code point U+00XX (`%E9` is `é`, not a UTF-8 byte) and
/// `%uXXXX` names one UTF-16 code unit, so surrogate pairs written as two
/// escapes combine. Malformed escapes are kept verbatim; unpaired
/// surrogates become U+FFFD.
fn unescape(text: &str) -> String {
    let mut units: Vec<u16> = Vec::with_capacity(text.len());
    let mut rest = text;
    while let Some(pos) = rest.find('%') {
        units.extend(rest[..pos].encode_utf16());
        let after = &rest[pos + 1..];
        if let Some(unit) = after.strip_prefix('u').and_then(|hex| hex_unit(hex, 4)) {
            units.push(unit);
            rest = &after[5..];
        } else if let Some(unit) = hex_unit(after, 2) {
            units.push(unit);
            rest = &after[2..];
        } else {
            units.push(u16::from(b'%'));
            rest = after;
        }
    }
    units.extend(rest.encode_utf16());
    String::from_utf16_lossy(&units)
}

/// Value of the leading `digits` hex digits of `text`.
fn hex_unit(text: &str, digits: usize) -> Option<u16> {
    let hex = text.get(..digits)?;
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u16::from_str_radix(hex, 16).ok()
}

/// Encode a raw argument into a compound command token.
///
/// Every comma-separated element is decoded, prefixed with `prefix`, and
/// joined with [`OPERATION_DELIMITER`] in the original order. A single
/// element produces the same string as a one-element list.
pub fn encode(argument: &str, prefix: &str) -> String {
    argument
        .split(ELEMENT_SEPARATOR)
        .map(|element| format!("{prefix}{}", decode_element(element)))
        .collect::<Vec<_>>()
        .join(OPERATION_DELIMITER)
}
