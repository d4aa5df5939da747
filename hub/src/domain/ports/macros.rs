//! `define_port_error!`: error enums for port adapters.
//!
//! Each variant carries its display message and gets a snake-case
//! constructor whose field parameters accept anything convertible into the
//! stored type, so adapters can write `SessionCacheError::io(err.to_string())`
//! or `SessionCacheError::io("disk full")` alike.

macro_rules! define_port_error {
    (
        $(#[$enum_meta:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:literal
            ),* $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field: $ty),* } )?,
            )*
        }

        ::paste::paste! {
            impl $name {
                $(
                    #[must_use]
                    pub fn [<$variant:snake>]($( $($field: impl Into<$ty>),* )?) -> Self {
                        Self::$variant $( { $($field: $field.into()),* } )?
                    }
                )*
            }
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    //! Regression coverage for the generated constructors.
    define_port_error! {
        pub enum CachePortError {
            Unavailable => "cache unavailable",
            Io { message: String } => "cache io: {message}",
            Stale { age_secs: u64 } => "entry stale after {age_secs}s",
        }
    }

    #[test]
    fn unit_variants_get_nullary_constructors() {
        assert_eq!(CachePortError::unavailable().to_string(), "cache unavailable");
    }

    #[test]
    fn constructors_accept_str_for_string_fields() {
        let err = CachePortError::io("disk full");
        assert_eq!(err.to_string(), "cache io: disk full");
    }

    #[test]
    fn constructors_preserve_non_string_types() {
        let err = CachePortError::stale(30_u64);
        assert_eq!(err.to_string(), "entry stale after 30s");
    }
}
