//! Macros to reduce boilerplate in the codebase

/// Macro to generate Display and FromStr implementations for enums
///
/// Parsing is case-insensitive. The error constructor receives the
/// original (unlowered) input.
///
/// # Usage
///
/// ```rust,ignore
/// enum_display_fromstr!(
///     MyEnum,
///     HelpdeskError::invalid_my_enum,
///     {
///         Variant1 => "variant1",
///         Variant2 => "variant_2",
///     }
/// );
/// ```
#[macro_export]
macro_rules! enum_display_fromstr {
    (
        $enum_name:ident,
        $error_variant:path,
        { $($variant:ident => $str:expr),+ $(,)? }
    ) => {
        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $($enum_name::$variant => write!(f, $str),)+
                }
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = $crate::error::HelpdeskError;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                match s.to_lowercase().as_str() {
                    $($str => Ok($enum_name::$variant),)+
                    _ => Err($error_variant(s.to_string())),
                }
            }
        }
    };
}
