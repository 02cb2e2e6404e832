use crate::error::Error;
use crate::initialization::InitMethod;

#[rustfmt::skip]
macro_rules! gp_options_spec {
    ($m:ident) => {
        $m! {
            values {
                seed:
                    (u64, 0, "seed"),
                min_depth:
                    (usize, 1, "min-depth"),
                max_depth:
                    (usize, 6, "max-depth"),
                max_size:
                    (usize, 30, "max-size"),
                pop_size:
                    (usize, 100, "pop-size"),
                generations:
                    (usize, 50, "generations"),
                mutation_rate:
                    (f64, 0.25, "mutation-rate"),
                init_method:
                    (InitMethod, InitMethod::Ptc2, "init-method"),
                nls_max_iterations:
                    (usize, 10, "nls-max-iterations"),
                timeout_in_seconds:
                    (f64, 0.0, "timeout-in-seconds"),
            }
            neg_flags {
                elitism:
                    (true, no_elitism, "no-elitism"),
                tournament_parents:
                    (true, no_tournament_parents, "no-tournament-parents"),
                use_nls_optimization:
                    (true, no_nls_optimization, "no-nls-optimization"),
            }
            pos_flags {
                verbose:
                    (false, verbose, "verbose"),
                keep_linear_transform_box:
                    (false, keep_linear_transform_box, "keep-linear-transform-box"),
            }
        }
    };
}

macro_rules! __define_options {
    (
        values { $( $name:ident: ($ty:ty, $default:expr, $cli_long:literal), )* }
        neg_flags { $( $iname:ident: ($bdefault:expr, $cli_name:ident, $cli_blong:literal), )* }
        pos_flags { $( $pname:ident: ($pdefault:expr, $cli_pname:ident, $cli_plong:literal), )* }
    ) => {
        /// Search configuration.
        ///
        /// `max_size` bounds the true node count used by the operators; `max_depth` bounds
        /// the number of levels. With `use_nls_optimization`, every new tree is wrapped in
        /// an offset and scale and its constants are fitted for at most
        /// `nls_max_iterations` Levenberg-Marquardt steps. A `timeout_in_seconds` of zero
        /// disables the wall-clock limit.
        #[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
        #[cfg_attr(feature = "serde", serde(default))]
        #[derive(Clone, Debug, PartialEq)]
        pub struct Options {
            $(pub $name: $ty,)*
            $(pub $iname: bool,)*
            $(pub $pname: bool,)*
        }

        impl Default for Options {
            fn default() -> Self {
                Self {
                    $($name: $default,)*
                    $($iname: $bdefault,)*
                    $($pname: $pdefault,)*
                }
            }
        }
    };
}

gp_options_spec!(__define_options);

impl Options {
    pub fn validate(&self) -> Result<(), Error> {
        if self.min_depth < 1 {
            return Err(Error::invalid_option("min_depth", "must be >= 1"));
        }
        if self.max_depth < self.min_depth {
            return Err(Error::invalid_option(
                "max_depth",
                format!("must be >= min_depth ({})", self.min_depth),
            ));
        }
        if self.max_size < 1 {
            return Err(Error::invalid_option("max_size", "must be >= 1"));
        }
        if self.pop_size < 1 {
            return Err(Error::invalid_option("pop_size", "must be >= 1"));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(Error::invalid_option(
                "mutation_rate",
                format!("must be in [0, 1], got {}", self.mutation_rate),
            ));
        }
        if !(self.timeout_in_seconds >= 0.0) {
            return Err(Error::invalid_option("timeout_in_seconds", "must be >= 0"));
        }
        Ok(())
    }
}

#[cfg(feature = "cli")]
pub(crate) mod cli_args {
    use clap::Args;

    use super::Options;
    use crate::initialization::InitMethod;

    macro_rules! __define_options_args {
        (
            values { $( $name:ident: ($ty:ty, $default:expr, $cli_long:literal), )* }
            neg_flags { $( $iname:ident: ($bdefault:expr, $cli_name:ident, $cli_blong:literal), )* }
            pos_flags { $( $pname:ident: ($pdefault:expr, $cli_pname:ident, $cli_plong:literal), )* }
        ) => {
            #[derive(Args, Debug, Clone, Default)]
            pub struct OptionsArgs {
                $(
                    #[arg(long = $cli_long)]
                    pub $name: Option<$ty>,
                )*

                $(
                    #[arg(long = $cli_blong)]
                    pub $cli_name: bool,
                )*

                $(
                    #[arg(long = $cli_plong)]
                    pub $cli_pname: bool,
                )*
            }

            impl OptionsArgs {
                pub fn apply_to(&self, opt: &mut Options) {
                    $(
                        if let Some(v) = self.$name {
                            opt.$name = v;
                        }
                    )*

                    $(
                        if self.$cli_name {
                            opt.$iname = false;
                        }
                    )*

                    $(
                        if self.$cli_pname {
                            opt.$pname = true;
                        }
                    )*
                }
            }
        };
    }

    gp_options_spec!(__define_options_args);
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn defaults_are_valid() {
        let opt = Options::default();
        assert!(opt.validate().is_ok());
        assert!(opt.elitism);
        assert!(opt.use_nls_optimization);
        assert!(!opt.keep_linear_transform_box);
        assert_eq!(opt.init_method, InitMethod::Ptc2);
    }

    #[rstest]
    #[case(Options { min_depth: 0, ..Default::default() }, "min_depth")]
    #[case(Options { min_depth: 4, max_depth: 3, ..Default::default() }, "max_depth")]
    #[case(Options { max_size: 0, ..Default::default() }, "max_size")]
    #[case(Options { pop_size: 0, ..Default::default() }, "pop_size")]
    #[case(Options { mutation_rate: 1.5, ..Default::default() }, "mutation_rate")]
    #[case(Options { mutation_rate: f64::NAN, ..Default::default() }, "mutation_rate")]
    #[case(Options { timeout_in_seconds: -1.0, ..Default::default() }, "timeout_in_seconds")]
    fn invalid_options_are_rejected(#[case] opt: Options, #[case] field: &str) {
        match opt.validate() {
            Err(Error::InvalidOption { name, .. }) => assert_eq!(name, field),
            other => panic!("expected invalid `{field}`, got {other:?}"),
        }
    }
}

#[cfg(all(test, feature = "cli"))]
mod cli_args_tests {
    use super::Options;
    use super::cli_args::OptionsArgs;
    use crate::initialization::InitMethod;

    #[test]
    fn cli_options_patch_applies() {
        let args = OptionsArgs {
            generations: Some(123),
            init_method: Some(InitMethod::Ramped),
            no_elitism: true,
            keep_linear_transform_box: true,
            ..Default::default()
        };
        let mut opt = Options::default();
        args.apply_to(&mut opt);
        assert_eq!(opt.generations, 123);
        assert_eq!(opt.init_method, InitMethod::Ramped);
        assert!(!opt.elitism);
        assert!(opt.keep_linear_transform_box);
        assert!(opt.tournament_parents);
    }
}
