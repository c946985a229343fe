// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Optimistic on/off state reconciled by periodic refreshes.

/// A remotely observed boolean with a locally asserted override.
///
/// User actions set the override so the requested value is reported at
/// once. Every refresh drops the override before recording the confirmed
/// value, so the next poll always wins, whether or not the device has caught
/// up with the request yet.
///
/// # Examples
///
/// ```
/// use eversolo_lib::switch::OptimisticToggle;
///
/// let mut toggle = OptimisticToggle::new(false);
/// assert!(!toggle.read());
///
/// toggle.request(true);
/// assert!(toggle.read());
///
/// // Device not up yet: the poll overrides the request.
/// toggle.on_refresh(false);
/// assert!(!toggle.read());
///
/// toggle.on_refresh(true);
/// assert!(toggle.read());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OptimisticToggle {
    confirmed: bool,
    optimistic: Option<bool>,
}

impl OptimisticToggle {
    /// Creates a toggle with no pending override.
    #[must_use]
    pub const fn new(confirmed: bool) -> Self {
        Self {
            confirmed,
            optimistic: None,
        }
    }

    /// Asserts `value` until the next refresh. The last request wins.
    pub fn request(&mut self, value: bool) {
        self.optimistic = Some(value);
    }

    /// Records a refresh result.
    ///
    /// The override is cleared unconditionally before `confirmed` is
    /// updated.
    pub fn on_refresh(&mut self, confirmed: bool) {
        self.optimistic = None;
        self.confirmed = confirmed;
    }

    /// Returns the override if one is pending, the confirmed value otherwise.
    #[must_use]
    pub const fn read(&self) -> bool {
        match self.optimistic {
            Some(value) => value,
            None => self.confirmed,
        }
    }

    /// Returns the last confirmed value.
    #[must_use]
    pub const fn confirmed(&self) -> bool {
        self.confirmed
    }

    /// Returns the pending override, if any.
    #[must_use]
    pub const fn pending(&self) -> Option<bool> {
        self.optimistic
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_without_override() {
        let toggle = OptimisticToggle::new(true);
        assert_eq!(toggle.pending(), None);
        assert!(toggle.read());
    }

    #[test]
    fn request_on_wins_over_confirmed() {
        for confirmed in [false, true] {
            let mut toggle = OptimisticToggle::new(confirmed);
            toggle.request(true);
            assert!(toggle.read());
            assert_eq!(toggle.confirmed(), confirmed);
        }
    }

    #[test]
    fn request_off_wins_over_confirmed() {
        for confirmed in [false, true] {
            let mut toggle = OptimisticToggle::new(confirmed);
            toggle.request(false);
            assert!(!toggle.read());
        }
    }

    #[test]
    fn refresh_always_reports_confirmed() {
        let sequences: [&[Option<bool>]; 4] = [
            &[],
            &[Some(true)],
            &[Some(false), Some(true)],
            &[Some(true), None, Some(false)],
        ];

        for steps in sequences {
            for confirmed in [false, true] {
                let mut toggle = OptimisticToggle::default();
                for step in steps {
                    match step {
                        Some(v) => toggle.request(*v),
                        None => toggle.on_refresh(!confirmed),
                    }
                }
                toggle.on_refresh(confirmed);
                assert_eq!(toggle.read(), confirmed);
                assert_eq!(toggle.pending(), None);
            }
        }
    }

    #[test]
    fn wake_then_poll_scenario() {
        let mut toggle = OptimisticToggle::new(false);
        assert!(!toggle.read());

        toggle.request(true);
        assert!(toggle.read());

        toggle.on_refresh(false);
        assert!(!toggle.read());

        toggle.on_refresh(true);
        assert!(toggle.read());
    }

    #[test]
    fn last_request_wins() {
        let mut toggle = OptimisticToggle::new(false);
        toggle.request(false);
        toggle.request(true);
        assert!(toggle.read());
        assert_eq!(toggle.pending(), Some(true));
    }
}
