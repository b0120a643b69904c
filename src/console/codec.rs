//! Typed argument values and token parsing
//!
//! Stateless. Integers follow C `strtol(.., 0)` literal rules: optional
//! sign, `0x`/`0X` for hex, a leading `0` for octal, decimal otherwise.

use core::fmt;

/// Integer argument type
pub type Int = i32;

/// Declared type of a command argument
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgType {
    /// Signed integer (`Int`)
    Int,
    /// Token text, as typed
    Str,
}

/// Resolved argument slot handed to a command handler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgValue<'a> {
    /// Parsed integer
    Int(Int),
    /// Token text
    Str(&'a str),
    /// Optional argument the user left out
    Default(ArgType),
}

impl<'a> ArgValue<'a> {
    /// Sentinel for an omitted optional integer.
    pub const INT_DEFAULT: Self = Self::Default(ArgType::Int);

    /// Sentinel for an omitted optional string.
    pub const STR_DEFAULT: Self = Self::Default(ArgType::Str);

    /// Sentinel for an omitted argument of type `ty`
    pub const fn default_for(ty: ArgType) -> Self {
        Self::Default(ty)
    }

    /// Integer value, `None` if omitted or not an integer
    pub fn as_int(&self) -> Option<Int> {
        match *self {
            Self::Int(v) => Some(v),
            _ => None,
        }
    }

    /// String value, `None` if omitted or not a string
    pub fn as_str(&self) -> Option<&'a str> {
        match *self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Check for the omitted-argument sentinel
    pub fn is_default(&self) -> bool {
        matches!(self, Self::Default(_))
    }
}

impl fmt::Display for ArgValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{}", v),
            Self::Str(s) => f.write_str(s),
            Self::Default(_) => f.write_str("(default)"),
        }
    }
}

/// Token rejected by the codec
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecError {
    /// Not an integer literal, trailing garbage, or out of range
    InvalidInt,
}

/// Parse a token as a value of type `ty`
pub fn parse_arg(token: &str, ty: ArgType) -> Result<ArgValue<'_>, CodecError> {
    match ty {
        ArgType::Int => parse_int(token).map(ArgValue::Int),
        ArgType::Str => Ok(ArgValue::Str(token)),
    }
}

/// Parse an integer literal, consuming the whole token
pub fn parse_int(token: &str) -> Result<Int, CodecError> {
    let (negative, unsigned) = match token.as_bytes().first() {
        Some(b'-') => (true, &token[1..]),
        Some(b'+') => (false, &token[1..]),
        _ => (false, token),
    };

    let (radix, digits) = if let Some(hex) = unsigned
        .strip_prefix("0x")
        .or_else(|| unsigned.strip_prefix("0X"))
    {
        (16, hex)
    } else if unsigned.len() > 1 && unsigned.starts_with('0') {
        (8, &unsigned[1..])
    } else {
        (10, unsigned)
    };

    // from_str_radix would take a second sign, so check digits ourselves
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Err(CodecError::InvalidInt);
    }

    let magnitude = u64::from_str_radix(digits, radix).map_err(|_| CodecError::InvalidInt)?;
    let value = if negative {
        -(magnitude as i128)
    } else {
        magnitude as i128
    };

    Int::try_from(value).map_err(|_| CodecError::InvalidInt)
}
