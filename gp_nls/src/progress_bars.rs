#[cfg(feature = "progress")]
mod imp {
    use std::io::IsTerminal;

    use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

    use crate::options::Options;

    pub(crate) struct SearchProgress {
        show: bool,
        bar: ProgressBar,
    }

    impl SearchProgress {
        pub(crate) fn new(options: &Options) -> Self {
            let show = options.verbose && std::io::stderr().is_terminal();
            let bar = if show {
                let pb = ProgressBar::new(options.generations as u64);
                pb.set_draw_target(ProgressDrawTarget::stderr_with_hz(10));
                pb.set_prefix(format!("Evolving for {} generations...", options.generations));
                match ProgressStyle::with_template("{prefix} {wide_bar} {pos:>5}/{len:5} [{elapsed_precise}<{eta_precise}]\n{msg}") {
                    Ok(style) => pb.set_style(style),
                    Err(err) => log::debug!("progress template rejected: {err}"),
                }
                pb
            } else {
                ProgressBar::hidden()
            };
            Self { show, bar }
        }

        pub(crate) fn on_generation(&mut self, generation: usize, best_fitness: f64, best_expr: &str) {
            if !self.show {
                return;
            }
            self.bar.inc(1);
            self.bar
                .set_message(format!("gen {generation} | best rmse {best_fitness:.6e} | {best_expr}"));
        }

        pub(crate) fn finish(&self) {
            if self.show {
                self.bar.finish();
            }
        }
    }
}

#[cfg(not(feature = "progress"))]
mod imp {
    use crate::options::Options;

    pub(crate) struct SearchProgress;

    impl SearchProgress {
        pub(crate) fn new(_options: &Options) -> Self {
            Self
        }

        pub(crate) fn on_generation(&mut self, _generation: usize, _best_fitness: f64, _best_expr: &str) {}

        pub(crate) fn finish(&self) {}
    }
}

pub(crate) use imp::SearchProgress;
