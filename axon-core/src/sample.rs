use ndarray::Array1;

/// The value a signal produces at a single point in simulation time.
///
/// Signals compute in `f64`; the cast to `f32` happens once, at the
/// [`OutputBuffer`](crate::OutputBuffer) boundary.
pub type Sample = Array1<f64>;

/// Conversion into a [`Sample`].
///
/// Implemented for scalars, vectors, slices, and `ndarray` arrays so that
/// constructors accepting a literal value are polymorphic over anything
/// array-convertible, resolved at compile time rather than by a runtime
/// type check. Scalars become width-1 samples.
pub trait IntoSample {
    fn into_sample(self) -> Sample;
}

impl IntoSample for f64 {
    fn into_sample(self) -> Sample {
        Sample::from_elem(1, self)
    }
}

impl IntoSample for f32 {
    fn into_sample(self) -> Sample {
        Sample::from_elem(1, f64::from(self))
    }
}

impl IntoSample for Vec<f64> {
    fn into_sample(self) -> Sample {
        Sample::from_vec(self)
    }
}

impl IntoSample for Vec<f32> {
    fn into_sample(self) -> Sample {
        self.into_iter().map(f64::from).collect()
    }
}

impl IntoSample for &[f64] {
    fn into_sample(self) -> Sample {
        self.iter().copied().collect()
    }
}

impl IntoSample for &[f32] {
    fn into_sample(self) -> Sample {
        self.iter().copied().map(f64::from).collect()
    }
}

impl IntoSample for Array1<f64> {
    fn into_sample(self) -> Sample {
        self
    }
}

impl IntoSample for Array1<f32> {
    fn into_sample(self) -> Sample {
        self.mapv(f64::from)
    }
}
