//! Defines helper macros for generating domain port error enums.

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
    //! Regression coverage for generated port error constructors.
    define_port_error! {
        pub enum StoragePortError {
            Unreachable { message: String } => "store unreachable: {message}",
            Exhausted { attempts: u32 } => "gave up after {attempts} attempts",
            Rejected { message: String, status: u16 } => "rejected ({status}): {message}",
            Closed => "store closed",
        }
    }

    #[test]
    fn string_fields_accept_borrowed_input() {
        let err = StoragePortError::unreachable("socket reset");
        assert_eq!(err.to_string(), "store unreachable: socket reset");
    }

    #[test]
    fn non_string_fields_keep_their_type() {
        let err = StoragePortError::exhausted(3_u32);
        assert_eq!(err, StoragePortError::Exhausted { attempts: 3 });
    }

    #[test]
    fn mixed_fields_render_in_declared_order() {
        let err = StoragePortError::rejected("duplicate key", 23_u16);
        assert_eq!(err.to_string(), "rejected (23): duplicate key");
    }

    #[test]
    fn unit_variants_get_nullary_constructors() {
        assert_eq!(StoragePortError::closed().to_string(), "store closed");
    }
}
