/// Options selecting which strategy runs and how it plans.
///
/// Running without specifying options picks manual fan-out in single precision
/// with estimated planning.
///
/// You only need to tune these options when comparing backends against each
/// other, e.g. to give both batch strategies the same planning effort.
#[non_exhaustive]
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub strategy: StrategyKind,
    pub precision: Option<Precision>,
    pub planning: Option<PlanningMode>,
}

impl RunOptions {
    /// Options for `strategy` with its default precision and planning
    pub fn new(strategy: StrategyKind) -> Self {
        Self {
            strategy,
            ..Self::default()
        }
    }

    /// Precision to run at, falling back to the strategy's default
    pub fn precision(&self) -> Precision {
        self.precision
            .unwrap_or_else(|| self.strategy.default_precision())
    }

    /// Planning effort to use, falling back to the strategy's default
    pub fn planning(&self) -> PlanningMode {
        self.planning
            .unwrap_or_else(|| self.strategy.default_planning())
    }
}

/// How a batch is handed to the transform library.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum StrategyKind {
    /// One plan covering the whole batch, executed with a single call
    NativeBatch,
    #[default]
    /// One single-signal plan shared by explicitly spawned worker threads
    ManualParallel,
    /// A descriptor configured step by step, committed, then executed once
    BatchDescriptor,
}

impl StrategyKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::NativeBatch => "native-batch",
            Self::ManualParallel => "manual-parallel",
            Self::BatchDescriptor => "batch-descriptor",
        }
    }

    /// The general-purpose batch plan ran in double precision; the other two in single.
    pub fn default_precision(self) -> Precision {
        match self {
            Self::NativeBatch => Precision::Double,
            Self::ManualParallel | Self::BatchDescriptor => Precision::Single,
        }
    }

    pub fn default_planning(self) -> PlanningMode {
        match self {
            Self::NativeBatch => PlanningMode::Measure,
            Self::ManualParallel | Self::BatchDescriptor => PlanningMode::Estimate,
        }
    }

    /// Whether the strategy's plan construction accepts a planning effort at all
    pub fn supports_planning(self) -> bool {
        !matches!(self, Self::BatchDescriptor)
    }
}

/// Floating point width of each sample component.
#[derive(Debug, Copy, Clone, PartialEq, Eq, clap::ValueEnum)]
pub enum Precision {
    /// `f32` components
    Single,
    /// `f64` components
    Double,
}

/// Effort spent choosing an algorithm while building a plan.
/// Planning is never part of the timed region, so measuring only costs setup time.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum PlanningMode {
    #[default]
    /// Take the library's own guess for the fastest algorithm
    Estimate,
    /// Time every candidate algorithm on a probe buffer and keep the fastest
    ///
    /// Noticeably slower to plan, and the winner can change between runs on a noisy machine.
    Measure,
}
