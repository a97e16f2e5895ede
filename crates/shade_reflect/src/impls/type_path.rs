// `TypePath` for the generic std containers used as reflected types.

use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::cell::OnceCell;
use std::collections::HashMap;
use std::sync::OnceLock;
use std::sync::mpsc::{Receiver, Sender};

use crate::Reflect;
use crate::impls::{GenericTypePathCell, concat};
use crate::info::TypePath;

fn generic_path(base: &str, params: &[&str]) -> String {
    let mut pieces = Vec::with_capacity(params.len() * 2 + 2);
    pieces.push(base);
    pieces.push("<");
    for (index, param) in params.iter().enumerate() {
        if index > 0 {
            pieces.push(", ");
        }
        pieces.push(param);
    }
    pieces.push(">");
    concat(&pieces)
}

macro_rules! impl_generic_type_path {
    ($module:literal, $ident:ident < $($param:ident $(: ?$sized:ident)?),+ >) => {
        impl<$($param: TypePath $(+ ?$sized)?),+> TypePath for $ident<$($param),+> {
            fn type_path() -> &'static str {
                static CELL: GenericTypePathCell = GenericTypePathCell::new();
                CELL.get_or_insert::<Self>(|| {
                    generic_path(
                        concat!($module, "::", stringify!($ident)),
                        &[$(<$param as TypePath>::type_path()),+],
                    )
                })
            }

            fn type_name() -> &'static str {
                static CELL: GenericTypePathCell = GenericTypePathCell::new();
                CELL.get_or_insert::<Self>(|| {
                    generic_path(stringify!($ident), &[$(<$param as TypePath>::type_name()),+])
                })
            }

            #[inline]
            fn type_ident() -> &'static str {
                stringify!($ident)
            }

            #[inline]
            fn module_path() -> Option<&'static str> {
                Some($module)
            }
        }
    };
}

impl_generic_type_path!("core::option", Option<T>);
impl_generic_type_path!("alloc::vec", Vec<T>);
impl_generic_type_path!("alloc::boxed", Box<T: ?Sized>);
impl_generic_type_path!("alloc::rc", Rc<T: ?Sized>);
impl_generic_type_path!("alloc::sync", Arc<T: ?Sized>);
impl_generic_type_path!("core::cell", OnceCell<T>);
impl_generic_type_path!("std::sync", OnceLock<T>);
impl_generic_type_path!("std::collections", HashMap<K, V>);
impl_generic_type_path!("alloc::collections", BTreeMap<K, V>);
impl_generic_type_path!("std::sync::mpsc", Sender<T>);
impl_generic_type_path!("std::sync::mpsc", Receiver<T>);

impl TypePath for dyn Reflect {
    #[inline]
    fn type_path() -> &'static str {
        "dyn shade_reflect::Reflect"
    }

    #[inline]
    fn type_name() -> &'static str {
        "dyn Reflect"
    }

    #[inline]
    fn type_ident() -> &'static str {
        "dyn Reflect"
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::rc::Rc;
    use alloc::string::String;
    use alloc::vec::Vec;
    use std::collections::HashMap;

    use crate::Reflect;
    use crate::info::TypePath;

    #[test]
    fn generic_paths() {
        assert_eq!(Vec::<i64>::type_path(), "alloc::vec::Vec<i64>");
        assert_eq!(Vec::<i64>::type_name(), "Vec<i64>");
        assert_eq!(Vec::<i64>::type_ident(), "Vec");
        assert_eq!(
            HashMap::<String, Rc<u8>>::type_name(),
            "HashMap<String, Rc<u8>>"
        );
        assert_eq!(
            Option::<Box<dyn Reflect>>::type_path(),
            "core::option::Option<alloc::boxed::Box<dyn shade_reflect::Reflect>>"
        );
    }
}
