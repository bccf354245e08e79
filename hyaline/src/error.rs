use hyaline_reflect::ReflectError;

/// The step of a build that failed
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BuildStage {
    /// Converting metadata and planning the merged field list
    Merge,
    /// Registering the type and materializing the instance
    Define,
}

impl core::fmt::Display for BuildStage {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BuildStage::Merge => write!(f, "merging the template"),
            BuildStage::Define => write!(f, "defining the type"),
        }
    }
}

/// A shape could not be built.
///
/// No instance exists after this error. A failure at [`BuildStage::Merge`]
/// registered nothing; a failure at [`BuildStage::Define`] means the type
/// name was not registered by this build.
#[derive(Clone, Debug, PartialEq)]
pub struct HyalineError {
    stage: BuildStage,
    source: ReflectError,
}

impl HyalineError {
    pub(crate) fn new(stage: BuildStage, source: ReflectError) -> Self {
        Self { stage, source }
    }

    /// The step that failed
    pub fn stage(&self) -> BuildStage {
        self.stage
    }

    /// The underlying failure
    pub fn reflect_error(&self) -> &ReflectError {
        &self.source
    }

    /// Unwraps the underlying failure
    pub fn into_inner(self) -> ReflectError {
        self.source
    }
}

impl core::fmt::Display for HyalineError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Failed {}: {}", self.stage, self.source)
    }
}

impl core::error::Error for HyalineError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        Some(&self.source)
    }
}
