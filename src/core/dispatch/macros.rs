/*!
 * Dispatch Table Macro
 */

/// Derive [`Dispatch`](crate::Dispatch) from a list of a type's methods
///
/// Arguments are decoded positionally with serde and return values encoded
/// with serde. Mark methods returning `Result<_, E>` with `#[fallible]`; their
/// error is passed through unchanged (`E: Into<anyhow::Error>`).
///
/// ```ignore
/// dispatch_table! {
///     Node as "Node", "TreeNode" {
///         fn name();
///         fn rename(name: String);
///         #[fallible] fn child(index: usize);
///         fn finalize();
///     }
/// }
/// ```
#[macro_export]
macro_rules! dispatch_table {
    (@encode #[fallible] $output:ident) => {
        $crate::core::dispatch::encode_result($output)
    };
    (@encode $output:ident) => {
        $crate::core::dispatch::encode_value($output)
    };
    (
        $ty:ty as $kind:literal $(, $also:literal)* {
            $( $(#[$flag:ident])? fn $op:ident ( $( $arg:ident : $arg_ty:ty ),* $(,)? ); )*
        }
    ) => {
        impl $crate::Dispatch for $ty {
            fn kinds(&self) -> &'static [&'static str] {
                &[$kind $(, $also)*]
            }

            fn operations(&self) -> &'static [&'static str] {
                &[$(stringify!($op)),*]
            }

            fn invoke(
                &mut self,
                operation: &str,
                args: &[$crate::Value],
            ) -> $crate::anyhow::Result<$crate::Value> {
                $(
                    if operation == stringify!($op) {
                        let arity: usize = 0 $( + { let _ = stringify!($arg); 1 } )*;
                        $crate::core::dispatch::check_arity(operation, arity, args.len())?;
                        #[allow(unused_mut, unused_variables)]
                        let mut args = args.iter();
                        $(
                            let $arg: $arg_ty = $crate::core::dispatch::decode_arg(
                                operation,
                                stringify!($arg),
                                args.next(),
                            )?;
                        )*
                        let output = self.$op($($arg),*);
                        return $crate::dispatch_table!(@encode $(#[$flag])? output);
                    }
                )*
                Err($crate::GuardError::UnknownOperation {
                    kind: $kind.to_string(),
                    operation: operation.to_string(),
                }
                .into())
            }
        }
    };
}
