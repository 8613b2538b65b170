//! Regression test parameters and operations

/// Regression test parameters
///
/// This structure tracks the state of a regression test, including
/// the test name, current index, and success status. Comparisons are
/// numbered from 1 in the order they are made so a failure report points
/// at the exact check.
pub struct RegParams {
    /// Name of the test (e.g., "snow")
    pub test_name: String,
    /// Current test index (incremented before each test)
    index: usize,
    /// Overall success status
    success: bool,
    /// Recorded failures
    failures: Vec<String>,
}

impl RegParams {
    /// Create new regression test parameters
    ///
    /// # Arguments
    ///
    /// * `test_name` - Name of the test (e.g., "snow")
    pub fn new(test_name: &str) -> Self {
        crate::init_tracing();

        eprintln!();
        eprintln!("////////////////////////////////////////////////");
        eprintln!("////////////////   {}_reg   ///////////////", test_name);
        eprintln!("////////////////////////////////////////////////");

        Self {
            test_name: test_name.to_string(),
            index: 0,
            success: true,
            failures: Vec::new(),
        }
    }

    /// Get the current test index
    pub fn index(&self) -> usize {
        self.index
    }

    fn fail(&mut self, msg: String) -> bool {
        eprintln!("{}", msg);
        self.failures.push(msg);
        self.success = false;
        false
    }

    /// Compare two floating-point values
    ///
    /// # Arguments
    ///
    /// * `expected` - Expected value
    /// * `actual` - Actual computed value
    /// * `delta` - Maximum allowed difference
    ///
    /// # Returns
    ///
    /// `true` if values match within delta, `false` otherwise.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        let diff = (expected - actual).abs();

        if diff > delta {
            let msg = format!(
                "Failure in {}_reg: value comparison for index {}\n\
                 difference = {} but allowed delta = {}\n\
                 expected = {}, actual = {}",
                self.test_name, self.index, diff, delta, expected, actual
            );
            self.fail(msg)
        } else {
            true
        }
    }

    /// Compare two array shapes
    ///
    /// # Returns
    ///
    /// `true` if the shapes are identical, `false` otherwise.
    pub fn compare_shapes(&mut self, expected: &[usize], actual: &[usize]) -> bool {
        self.index += 1;

        if expected != actual {
            let msg = format!(
                "Failure in {}_reg: shape comparison for index {}\n\
                 expected = {:?}, actual = {:?}",
                self.test_name, self.index, expected, actual
            );
            self.fail(msg)
        } else {
            true
        }
    }

    /// Compare two boolean sequences element by element
    ///
    /// # Returns
    ///
    /// `true` if both have the same length and values, `false` otherwise.
    pub fn compare_flags<'a, E, A>(&mut self, expected: E, actual: A) -> bool
    where
        E: IntoIterator<Item = &'a bool>,
        A: IntoIterator<Item = &'a bool>,
    {
        self.index += 1;
        let expected: Vec<bool> = expected.into_iter().copied().collect();
        let actual: Vec<bool> = actual.into_iter().copied().collect();

        if expected.len() != actual.len() {
            let msg = format!(
                "Failure in {}_reg: flag comparison for index {} - length {} vs {}",
                self.test_name,
                self.index,
                expected.len(),
                actual.len()
            );
            return self.fail(msg);
        }
        if let Some(pos) = expected.iter().zip(&actual).position(|(e, a)| e != a) {
            let msg = format!(
                "Failure in {}_reg: flag comparison for index {} - mismatch at row {}",
                self.test_name, self.index, pos
            );
            return self.fail(msg);
        }
        true
    }

    /// Record a condition that must hold
    ///
    /// # Returns
    ///
    /// The condition itself.
    pub fn check(&mut self, condition: bool, what: &str) -> bool {
        self.index += 1;

        if !condition {
            let msg = format!(
                "Failure in {}_reg: check for index {} - {}",
                self.test_name, self.index, what
            );
            self.fail(msg)
        } else {
            true
        }
    }

    /// Clean up and report results
    ///
    /// # Returns
    ///
    /// `true` if all tests passed, `false` if any failed.
    pub fn cleanup(self) -> bool {
        if self.success {
            eprintln!("SUCCESS: {}_reg", self.test_name);
        } else {
            eprintln!("FAILURE: {}_reg", self.test_name);
            for failure in &self.failures {
                eprintln!("  {}", failure);
            }
        }
        eprintln!();

        self.success
    }

    /// Check if all tests have passed so far
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Get list of failures
    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}
