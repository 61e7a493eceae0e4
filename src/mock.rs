//! Host-side pin doubles for the unit tests.

use std::sync::atomic::{AtomicBool, AtomicU8, AtomicUsize, Ordering};

use embedded_hal::digital::{self, ErrorKind, ErrorType, InputPin};

use crate::pin::{Edge, EdgePin};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockError;

impl digital::Error for MockError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

const EDGE_OFF: u8 = 0;
const EDGE_RISING: u8 = 1;
const EDGE_FALLING: u8 = 2;

/// Observable state of one simulated GPIO line.
///
/// Shared between the test body (which drives the level) and the
/// [`MockPin`] owned by the tracker.
pub struct MockLine {
    high: AtomicBool,
    fail_reads: AtomicBool,
    fail_config: AtomicBool,
    fail_enable: AtomicBool,
    fail_disable: AtomicBool,
    fail_clear: AtomicBool,
    configured: AtomicBool,
    edge: AtomicU8,
    clears: AtomicUsize,
}

impl MockLine {
    /// Leak a fresh line so pins holding it are `'static` and `Send`.
    pub fn leak() -> &'static MockLine {
        Box::leak(Box::new(MockLine {
            high: AtomicBool::new(false),
            fail_reads: AtomicBool::new(false),
            fail_config: AtomicBool::new(false),
            fail_enable: AtomicBool::new(false),
            fail_disable: AtomicBool::new(false),
            fail_clear: AtomicBool::new(false),
            configured: AtomicBool::new(false),
            edge: AtomicU8::new(EDGE_OFF),
            clears: AtomicUsize::new(0),
        }))
    }

    pub fn set_high(&self, high: bool) {
        self.high.store(high, Ordering::SeqCst);
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_config(&self, fail: bool) {
        self.fail_config.store(fail, Ordering::SeqCst);
    }

    pub fn fail_enable(&self, fail: bool) {
        self.fail_enable.store(fail, Ordering::SeqCst);
    }

    pub fn fail_disable(&self, fail: bool) {
        self.fail_disable.store(fail, Ordering::SeqCst);
    }

    pub fn fail_clear(&self, fail: bool) {
        self.fail_clear.store(fail, Ordering::SeqCst);
    }

    pub fn is_configured(&self) -> bool {
        self.configured.load(Ordering::SeqCst)
    }

    pub fn enabled_edge(&self) -> Option<Edge> {
        match self.edge.load(Ordering::SeqCst) {
            EDGE_RISING => Some(Edge::Rising),
            EDGE_FALLING => Some(Edge::Falling),
            _ => None,
        }
    }

    pub fn clear_count(&self) -> usize {
        self.clears.load(Ordering::SeqCst)
    }
}

/// Pin handed to the tracker.
#[derive(Clone, Copy)]
pub struct MockPin {
    pub line: &'static MockLine,
}

impl MockPin {
    pub fn new(line: &'static MockLine) -> Self {
        Self { line }
    }
}

impl ErrorType for MockPin {
    type Error = MockError;
}

impl InputPin for MockPin {
    fn is_high(&mut self) -> Result<bool, MockError> {
        if self.line.fail_reads.load(Ordering::SeqCst) {
            return Err(MockError);
        }
        Ok(self.line.high.load(Ordering::SeqCst))
    }

    fn is_low(&mut self) -> Result<bool, MockError> {
        self.is_high().map(|high| !high)
    }
}

impl EdgePin for MockPin {
    fn configure_input(&mut self) -> Result<(), MockError> {
        if self.line.fail_config.load(Ordering::SeqCst) {
            return Err(MockError);
        }
        self.line.configured.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn enable_edge_interrupt(&mut self, edge: Edge) -> Result<(), MockError> {
        if self.line.fail_enable.load(Ordering::SeqCst) {
            return Err(MockError);
        }
        let code = match edge {
            Edge::Rising => EDGE_RISING,
            Edge::Falling => EDGE_FALLING,
        };
        self.line.edge.store(code, Ordering::SeqCst);
        Ok(())
    }

    fn disable_edge_interrupt(&mut self) -> Result<(), MockError> {
        if self.line.fail_disable.load(Ordering::SeqCst) {
            return Err(MockError);
        }
        self.line.edge.store(EDGE_OFF, Ordering::SeqCst);
        Ok(())
    }

    fn clear_edge_interrupt(&mut self) -> Result<(), MockError> {
        if self.line.fail_clear.load(Ordering::SeqCst) {
            return Err(MockError);
        }
        self.line.clears.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Two fresh lines and the pins that read them.
pub fn pin_pair() -> (&'static MockLine, &'static MockLine, MockPin, MockPin) {
    let a = MockLine::leak();
    let b = MockLine::leak();
    (a, b, MockPin::new(a), MockPin::new(b))
}
