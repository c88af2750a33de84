//! Helper macro for declaring port error enums.
//!
//! Each variant gets a snake_case constructor; `String` fields accept anything
//! convertible into a `String`, so adapters can write
//! `ContentPersistenceError::query(err.to_string())` or pass a `&str`.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            #[must_use]
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
    define_port_error! {
        pub enum StorePortError {
            Unavailable => "store unavailable",
            Query { message: String } => "query failed: {message}",
            Limit { max: usize } => "limit {max} exceeded",
            Mixed { key: String, attempts: u32 } => "{key} failed after {attempts} attempts",
        }
    }

    #[test]
    fn unit_variants_get_nullary_constructors() {
        assert_eq!(StorePortError::unavailable(), StorePortError::Unavailable);
        assert_eq!(StorePortError::unavailable().to_string(), "store unavailable");
    }

    #[test]
    fn string_fields_accept_str_and_string() {
        assert_eq!(
            StorePortError::query("boom"),
            StorePortError::query(String::from("boom"))
        );
        assert_eq!(StorePortError::query("boom").to_string(), "query failed: boom");
    }

    #[test]
    fn non_string_fields_keep_their_type() {
        assert_eq!(StorePortError::limit(3_usize).to_string(), "limit 3 exceeded");
    }

    #[test]
    fn multi_field_variants_preserve_order() {
        let err = StorePortError::mixed("blogs", 2_u32);
        assert_eq!(err.to_string(), "blogs failed after 2 attempts");
    }
}
