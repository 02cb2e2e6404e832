use ndarray::Array1;

use super::Func;

/// Scalar definition of a built-in function; [`func`] lifts it to column vectors.
pub trait BuiltinOp<const A: usize> {
    const NAME: &'static str;

    fn eval(args: &[f64; A]) -> f64;
    fn partial(args: &[f64; A], idx: usize) -> f64;
}

macro_rules! builtin_op {
    (@name $Op:ident, $name:literal) => {
        $name
    };
    (@name $Op:ident) => {
        crate::paste::paste! { stringify!([<$Op:snake>]) }
    };
    (
        $(#[$meta:meta])*
        $Op:ident : $A:literal {
            $(name: $name:literal,)?
            eval($args:ident) $eval:block,
            partial($pargs:ident, $idx:ident) $partial:block $(,)?
        }
    ) => {
        $(#[$meta])*
        pub struct $Op;

        impl BuiltinOp<$A> for $Op {
            const NAME: &'static str = builtin_op!(@name $Op $(, $name)?);

            fn eval(args: &[f64; $A]) -> f64 {
                let $args = args;
                $eval
            }

            fn partial(args: &[f64; $A], idx: usize) -> f64 {
                let $pargs = args;
                let $idx = idx;
                $partial
            }
        }
    };
}

builtin_op!(Add: 2 {
    name: "+",
    eval(args) { args[0] + args[1] },
    partial(_args, idx) {
        match idx {
            0 | 1 => 1.0,
            _ => unreachable!(),
        }
    },
});

builtin_op!(Sub: 2 {
    name: "-",
    eval(args) { args[0] - args[1] },
    partial(_args, idx) {
        match idx {
            0 => 1.0,
            1 => -1.0,
            _ => unreachable!(),
        }
    },
});

builtin_op!(Mul: 2 {
    name: "*",
    eval(args) { args[0] * args[1] },
    partial(args, idx) {
        match idx {
            0 => args[1],
            1 => args[0],
            _ => unreachable!(),
        }
    },
});

builtin_op!(
    /// Unprotected division.
    Div: 2 {
    name: "/",
    eval(args) { args[0] / args[1] },
    partial(args, idx) {
        match idx {
            0 => 1.0 / args[1],
            1 => -args[0] / (args[1] * args[1]),
            _ => unreachable!(),
        }
    },
});

builtin_op!(Square: 1 {
    eval(args) { args[0] * args[0] },
    partial(args, idx) {
        match idx {
            0 => 2.0 * args[0],
            _ => unreachable!(),
        }
    },
});

builtin_op!(Sqrt: 1 {
    eval(args) { args[0].sqrt() },
    partial(args, idx) {
        match idx {
            0 => 0.5 / args[0].sqrt(),
            _ => unreachable!(),
        }
    },
});

builtin_op!(Exp: 1 {
    eval(args) { args[0].exp() },
    partial(args, idx) {
        match idx {
            0 => args[0].exp(),
            _ => unreachable!(),
        }
    },
});

builtin_op!(
    /// Unprotected natural logarithm.
    Log: 1 {
    eval(args) { args[0].ln() },
    partial(args, idx) {
        match idx {
            0 => 1.0 / args[0],
            _ => unreachable!(),
        }
    },
});

builtin_op!(Sin: 1 {
    eval(args) { args[0].sin() },
    partial(args, idx) {
        match idx {
            0 => args[0].cos(),
            _ => unreachable!(),
        }
    },
});

builtin_op!(Cos: 1 {
    eval(args) { args[0].cos() },
    partial(args, idx) {
        match idx {
            0 => -args[0].sin(),
            _ => unreachable!(),
        }
    },
});

builtin_op!(Tanh: 1 {
    eval(args) { args[0].tanh() },
    partial(args, idx) {
        match idx {
            0 => {
                let c = args[0].cosh();
                1.0 / (c * c)
            }
            _ => unreachable!(),
        }
    },
});

fn gather<const A: usize>(args: &[Array1<f64>], row: usize) -> [f64; A] {
    std::array::from_fn(|k| args[k][row])
}

/// Lift a scalar built-in to a vectorized [`Func`] carrying its partial kernel.
pub fn func<O: BuiltinOp<A> + 'static, const A: usize>() -> Func {
    Func::new(O::NAME, A, |args: &[Array1<f64>]| {
        Array1::from_shape_fn(args[0].len(), |i| O::eval(&gather::<A>(args, i)))
    })
    .with_partial(|args: &[Array1<f64>], idx: usize| {
        Array1::from_shape_fn(args[0].len(), |i| O::partial(&gather::<A>(args, i), idx))
    })
}

/// Every built-in, in the order [`super::FunctionSet::from_names`] searches them.
pub fn all() -> Vec<Func> {
    vec![
        func::<Add, 2>(),
        func::<Sub, 2>(),
        func::<Mul, 2>(),
        func::<Div, 2>(),
        func::<Square, 1>(),
        func::<Sqrt, 1>(),
        func::<Exp, 1>(),
        func::<Log, 1>(),
        func::<Sin, 1>(),
        func::<Cos, 1>(),
        func::<Tanh, 1>(),
    ]
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use ndarray::array;

    use super::*;

    #[test]
    fn names_follow_snake_case_or_symbol() {
        assert_eq!(<Add as BuiltinOp<2>>::NAME, "+");
        assert_eq!(<Div as BuiltinOp<2>>::NAME, "/");
        assert_eq!(<Square as BuiltinOp<1>>::NAME, "square");
        assert_eq!(<Log as BuiltinOp<1>>::NAME, "log");
    }

    #[test]
    fn lifted_kernels_are_elementwise() {
        let f = func::<Mul, 2>();
        let out = f.apply(&[array![1.0, 2.0, 3.0], array![4.0, 5.0, 6.0]]);
        assert_eq!(out, array![4.0, 10.0, 18.0]);

        let d = f.partial(&[array![1.0, 2.0], array![3.0, 4.0]], 0).unwrap();
        assert_eq!(d, array![3.0, 4.0]);
    }

    #[test]
    fn division_and_log_are_unprotected() {
        let div = func::<Div, 2>();
        let out = div.apply(&[array![1.0], array![0.0]]);
        assert!(out[0].is_infinite());

        let log = func::<Log, 1>();
        assert!(log.apply(&[array![-1.0]])[0].is_nan());
    }

    #[test]
    fn partials_match_central_differences() {
        let h = 1e-6;
        let x = 0.7;
        for f in all().into_iter().filter(|f| f.arity() == 1) {
            let d = f.partial(&[array![x]], 0).unwrap()[0];
            let fp = f.apply(&[array![x + h]])[0];
            let fm = f.apply(&[array![x - h]])[0];
            assert_relative_eq!(d, (fp - fm) / (2.0 * h), max_relative = 1e-5);
        }
    }
}
