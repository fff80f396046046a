use std::ops::{BitAnd, BitOr, BitXor, Not};

use verdict_core::Metadata;

use crate::spec::Specification;

macro_rules! binary_ops {
    ($trait:ident, $method:ident, $target:ident) => {
        impl<M: ?Sized + 'static, T: Metadata> $trait for Specification<M, T> {
            type Output = Specification<M, T>;

            fn $method(self, rhs: Specification<M, T>) -> Specification<M, T> {
                Specification::$target(&self, &rhs)
            }
        }

        impl<M: ?Sized + 'static, T: Metadata> $trait<&Specification<M, T>> for &Specification<M, T> {
            type Output = Specification<M, T>;

            fn $method(self, rhs: &Specification<M, T>) -> Specification<M, T> {
                Specification::$target(self, rhs)
            }
        }
    };
}

binary_ops!(BitAnd, bitand, and);
binary_ops!(BitOr, bitor, or);
binary_ops!(BitXor, bitxor, xor);

impl<M: ?Sized + 'static, T: Metadata> Not for Specification<M, T> {
    type Output = Specification<M, T>;

    fn not(self) -> Specification<M, T> {
        Specification::not(&self)
    }
}

impl<M: ?Sized + 'static, T: Metadata> Not for &Specification<M, T> {
    type Output = Specification<M, T>;

    fn not(self) -> Specification<M, T> {
        Specification::not(self)
    }
}
