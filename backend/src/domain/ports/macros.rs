//! `define_port_error!` generates a port error enum with `thiserror`
//! messages and one snake_case constructor per variant.
//!
//! ```ignore
//! define_port_error! {
//!     pub enum ProjectRepositoryError {
//!         Connection { message: String } => "connection failed: {message}",
//!     }
//! }
//!
//! let err = ProjectRepositoryError::connection("refused");
//! ```
//!
//! Constructor parameters take `impl Into<T>` so callers can pass `&str` for
//! `String` fields.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@ctor_impl $variant () () $( $field : $ty, )*);
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) ) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor_impl
            $variant
            ($($params)* $field: impl Into<$ty>,)
            ($($inits)* $field: $field.into(),)
            $($rest)*
        );
    };
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),* } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant $( { $($field : $ty),* } )?);
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    define_port_error! {
        pub enum SamplePortError {
            Unavailable => "sample store unavailable",
            Query { message: String } => "sample query failed: {message}",
            Rejected { field: String, attempts: u32 } => "{field} rejected after {attempts} attempts",
        }
    }

    #[test]
    fn unit_variants_get_nullary_constructors() {
        assert_eq!(SamplePortError::unavailable(), SamplePortError::Unavailable);
        assert_eq!(
            SamplePortError::unavailable().to_string(),
            "sample store unavailable"
        );
    }

    #[test]
    fn constructors_accept_str_for_string_fields() {
        let err = SamplePortError::query("timeout");
        assert_eq!(err.to_string(), "sample query failed: timeout");
    }

    #[test]
    fn constructors_support_mixed_fields() {
        let err = SamplePortError::rejected("status", 3_u32);
        assert_eq!(err.to_string(), "status rejected after 3 attempts");
    }
}
