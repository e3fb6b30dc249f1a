//! Helper macro for declaring port error enums.
//!
//! Each variant gets a snake_case constructor whose `String` fields accept
//! anything convertible into the field type, so adapters can write
//! `HttpExchangeError::timeout(err.to_string())` or pass a `&str` directly.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            #[doc = concat!("Build the `", stringify!($variant), "` variant.")]
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
            #[doc = concat!("Build the `", stringify!($variant), "` variant.")]
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
    //! Constructor coverage for generated port errors.
    define_port_error! {
        pub enum ProbePortError {
            Offline => "backend offline",
            Rejected { message: String } => "rejected: {message}",
            Status { code: u16 } => "status {code}",
            Detailed { message: String, code: u16 } => "{message} ({code})",
        }
    }

    #[test]
    fn unit_variants_get_nullary_constructors() {
        assert_eq!(ProbePortError::offline().to_string(), "backend offline");
    }

    #[test]
    fn string_fields_accept_str() {
        let err = ProbePortError::rejected("quota");
        assert_eq!(err.to_string(), "rejected: quota");
    }

    #[test]
    fn non_string_fields_keep_their_type() {
        assert_eq!(ProbePortError::status(503_u16).to_string(), "status 503");
        assert_eq!(
            ProbePortError::detailed("gateway", 502_u16).to_string(),
            "gateway (502)"
        );
    }
}
