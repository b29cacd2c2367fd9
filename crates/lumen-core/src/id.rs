//! Identity types for LUMEN instrumentation
//!
//! Every measurement and tag is correlated to a point in a distributed
//! trace through a [`ScopeId`], which composes:
//! - an [`EventId`] naming a definition-time event
//! - a [`SpanContext`] naming a span within a trace
//!
//! A zero value on either axis means "not scoped by this dimension".

use std::fmt;

/// Definition-time event identity (e.g. "this key was defined")
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct EventId(pub u64);

impl EventId {
    pub const ZERO: EventId = EventId(0);

    #[inline]
    pub fn new(id: u64) -> Self {
        EventId(id)
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Scope identifier constrained only by this event
    #[inline]
    pub fn scope(self) -> ScopeId {
        ScopeId {
            event_id: self,
            span_context: SpanContext::default(),
        }
    }
}

impl fmt::Debug for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Event({:016x})", self.0)
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for EventId {
    fn from(id: u64) -> Self {
        EventId(id)
    }
}

/// Span identity within a distributed trace.
///
/// The 128-bit trace id is carried as two 64-bit halves.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SpanContext {
    pub trace_id_high: u64,
    pub trace_id_low: u64,
    pub span_id: u64,
}

/// The "no context" span context, returned on error paths.
pub const INVALID_SPAN_CONTEXT: SpanContext = SpanContext {
    trace_id_high: 0,
    trace_id_low: 0,
    span_id: 0,
};

impl SpanContext {
    #[inline]
    pub const fn new(trace_id_high: u64, trace_id_low: u64, span_id: u64) -> Self {
        SpanContext {
            trace_id_high,
            trace_id_low,
            span_id,
        }
    }

    /// Build from a full 128-bit trace id
    #[inline]
    pub const fn from_trace_id(trace_id: u128, span_id: u64) -> Self {
        SpanContext {
            trace_id_high: (trace_id >> 64) as u64,
            trace_id_low: trace_id as u64,
            span_id,
        }
    }

    #[inline]
    pub fn trace_id(self) -> u128 {
        ((self.trace_id_high as u128) << 64) | self.trace_id_low as u128
    }

    #[inline]
    pub fn has_trace_id(self) -> bool {
        self.trace_id_high != 0 || self.trace_id_low != 0
    }

    #[inline]
    pub fn has_span_id(self) -> bool {
        self.span_id != 0
    }

    /// Both a trace and a span are present
    #[inline]
    pub fn is_valid(self) -> bool {
        self.has_trace_id() && self.has_span_id()
    }

    /// Abbreviated span id, e.g. `012..def`.
    ///
    /// Lossy and for diagnostics only; never compare on it.
    pub fn span_id_string(self) -> String {
        let p = format!("{:016x}", self.span_id);
        format!("{}..{}", &p[0..3], &p[13..16])
    }

    /// Abbreviated trace id: head of the high half, tail of the low half.
    pub fn trace_id_string(self) -> String {
        let high = format!("{:016x}", self.trace_id_high);
        let low = format!("{:016x}", self.trace_id_low);
        format!("{}..{}", &high[0..3], &low[13..16])
    }

    /// Scope identifier constrained only by this span
    #[inline]
    pub fn scope(self) -> ScopeId {
        ScopeId {
            event_id: EventId::ZERO,
            span_context: self,
        }
    }
}

impl fmt::Debug for SpanContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Span({:016x}{:016x}:{:016x})",
            self.trace_id_high, self.trace_id_low, self.span_id
        )
    }
}

impl fmt::Display for SpanContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.trace_id_string(), self.span_id_string())
    }
}

/// Correlation key for a measurement: event axis plus span axis
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ScopeId {
    pub event_id: EventId,
    pub span_context: SpanContext,
}

impl ScopeId {
    #[inline]
    pub fn new(event_id: EventId, span_context: SpanContext) -> Self {
        ScopeId {
            event_id,
            span_context,
        }
    }

    #[inline]
    pub fn has_event(self) -> bool {
        !self.event_id.is_zero()
    }

    #[inline]
    pub fn has_span(self) -> bool {
        self.span_context != INVALID_SPAN_CONTEXT
    }

    /// Wildcard match: an axis left at zero on either side constrains nothing.
    pub fn matches(self, other: ScopeId) -> bool {
        let event_ok =
            !self.has_event() || !other.has_event() || self.event_id == other.event_id;
        let span_ok =
            !self.has_span() || !other.has_span() || self.span_context == other.span_context;
        event_ok && span_ok
    }
}

impl fmt::Debug for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Scope({:?}, {:?})", self.event_id, self.span_context)
    }
}
