// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use super::{ColorClass, ColorSpan};

/// Collects the spans of one line.
///
/// Lexers call [`SpanEmitter::define`] at every position where the color may change.
/// Redundant calls are cheap: equal classes coalesce and a second definition at the same
/// position replaces the first. Definitions behind the last span are dropped, so the output
/// is always strictly ordered.
pub struct SpanEmitter {
    spans: Vec<ColorSpan>,
    limit: usize,
    base: usize,
    recording: bool,
}

impl SpanEmitter {
    /// An emitter for a line of `len` characters.
    pub fn new(len: usize) -> Self {
        Self { spans: Vec::new(), limit: len, base: 0, recording: true }
    }

    /// Starts `class` at `pos`, relative to the current embedding offset.
    pub fn define(&mut self, pos: usize, class: ColorClass) {
        if !self.recording {
            return;
        }

        let start = self.base + pos;
        match self.spans.last_mut() {
            Some(last) if start < last.start => {}
            Some(last) if start == last.start => {
                last.class = class;
                let n = self.spans.len();
                if n >= 2 && self.spans[n - 2].class == class {
                    self.spans.pop();
                }
            }
            Some(last) if last.class == class => {}
            _ => self.spans.push(ColorSpan::new(start, class)),
        }
    }

    /// Toggles recording and returns the previous setting.
    pub fn set_recording(&mut self, recording: bool) -> bool {
        std::mem::replace(&mut self.recording, recording)
    }

    pub fn is_recording(&self) -> bool {
        self.recording
    }

    /// Runs a sub-lexer whose positions are relative to `offset`.
    ///
    /// Recording is forced on for the duration and restored afterwards.
    pub fn embed<R>(&mut self, offset: usize, f: impl FnOnce(&mut Self) -> R) -> R {
        let base = self.base;
        let recording = self.recording;
        self.base += offset;
        self.recording = true;
        let result = f(self);
        self.base = base;
        self.recording = recording;
        result
    }

    pub fn spans(&self) -> &[ColorSpan] {
        &self.spans
    }

    /// Consumes the emitter. Spans starting at or past the end of the line are dropped.
    pub fn finish(mut self) -> Vec<ColorSpan> {
        while self.spans.last().is_some_and(|s| s.start >= self.limit) {
            self.spans.pop();
        }
        self.spans
    }
}
