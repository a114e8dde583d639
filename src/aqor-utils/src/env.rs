//! Compile-time configuration read from the build environment.
//!
//! Each macro takes the name of an environment variable, a default value and a short
//! human-readable description used in the build error when the variable cannot be parsed.

pub use {const_panic, konst};

macro_rules! define_env_with_default_macro {
    ($macro_name:ident, $parse_fn_name:ident, $output_type_name:literal) => {
        #[macro_export]
        macro_rules! $macro_name {
            ($env_var:literal, $default:expr, $doc:literal) => {
                if let Some(str_value) = option_env!($env_var) {
                    if let Ok(value) = $crate::env::konst::primitive::$parse_fn_name(str_value) {
                        value
                    } else {
                        $crate::env::const_panic::concat_panic!(
                            "Could not parse environment variable `",
                            $env_var,
                            "=",
                            str_value,
                            "` (",
                            $doc,
                            ") as ",
                            $output_type_name,
                        );
                    }
                } else {
                    $default
                }
            };
        }
    };
}

define_env_with_default_macro!(u8_from_env_or, parse_u8, "a u8");
define_env_with_default_macro!(i8_from_env_or, parse_i8, "an i8");
define_env_with_default_macro!(u32_from_env_or, parse_u32, "a u32");
define_env_with_default_macro!(u64_from_env_or, parse_u64, "a u64");
define_env_with_default_macro!(usize_from_env_or, parse_usize, "a usize");

#[cfg(test)]
mod tests {
    #[test]
    fn falls_back_to_default() {
        const VALUE: u32 =
            u32_from_env_or!("CONFIG_AQOR_UNSET_FOR_TESTS", 42, "test-only value");
        assert_eq!(VALUE, 42);
    }

    #[test]
    fn signed_default() {
        const VALUE: i8 = i8_from_env_or!("CONFIG_AQOR_UNSET_FOR_TESTS", -9, "test-only");
        assert_eq!(VALUE, -9);
    }
}
