use std::ops::{Add, Div, Mul, Neg, Rem, Sub};

use crate::{Position, Size};

/// Implement a componentwise binary operator for a vector type, both against
/// another vector of the same type and against an `i32` scalar.
macro_rules! componentwise {
    ($ty:ident { $a:ident, $b:ident }, $($trait:ident :: $method:ident),+) => {
        $(
            impl $trait for $ty {
                type Output = Self;

                fn $method(self, other: Self) -> Self {
                    Self {
                        $a: $trait::$method(self.$a, other.$a),
                        $b: $trait::$method(self.$b, other.$b),
                    }
                }
            }

            impl $trait<i32> for $ty {
                type Output = Self;

                fn $method(self, other: i32) -> Self {
                    Self {
                        $a: $trait::$method(self.$a, other),
                        $b: $trait::$method(self.$b, other),
                    }
                }
            }
        )+

        impl Neg for $ty {
            type Output = Self;

            fn neg(self) -> Self {
                Self {
                    $a: -self.$a,
                    $b: -self.$b,
                }
            }
        }
    };
}

componentwise!(Position { x, y }, Add::add, Sub::sub, Mul::mul, Div::div, Rem::rem);
componentwise!(Size { width, height }, Add::add, Sub::sub, Mul::mul, Div::div, Rem::rem);
