//! `define_port_error!`: declares a port error enum with `thiserror`
//! messages and snake_case constructors accepting `impl Into<_>` fields.

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
        pub enum StoragePortError {
            Unreachable => "storage unreachable",
            Rejected { reason: String } => "rejected: {reason}",
            Stale { id: i64 } => "stale record {id}",
            Conflict { reason: String, id: i64 } => "conflict on {id}: {reason}",
        }
    }

    #[test]
    fn unit_variants_get_nullary_constructors() {
        assert_eq!(StoragePortError::unreachable(), StoragePortError::Unreachable);
    }

    #[test]
    fn constructors_accept_str_for_string_fields() {
        let err = StoragePortError::rejected("bad row");
        assert_eq!(err.to_string(), "rejected: bad row");
    }

    #[test]
    fn constructors_preserve_non_string_types() {
        let err = StoragePortError::stale(42_i64);
        assert_eq!(err.to_string(), "stale record 42");
    }

    #[test]
    fn constructors_support_mixed_fields() {
        let err = StoragePortError::conflict("locked", 7_i64);
        assert_eq!(err.to_string(), "conflict on 7: locked");
    }
}
