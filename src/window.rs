use tracing::debug;

pub const MONTHS_IN_YEAR: usize = 12;

/// Number of consecutive months shown at once.
pub const WINDOW_LEN: usize = 6;

pub const MONTH_NAMES: [&str; MONTHS_IN_YEAR] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// Rotating cursor over the twelve calendar months. The cursor is the first
/// of the `WINDOW_LEN` displayed months and always lies in `0..12`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MonthWindow {
    cursor: usize,
}

impl MonthWindow {
    pub fn starting_at(month: usize) -> Self {
        Self {
            cursor: month % MONTHS_IN_YEAR,
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Move the window by one month and return the new cursor.
    pub fn advance(&mut self, direction: Direction) -> usize {
        self.cursor = match direction {
            Direction::Forward => (self.cursor + 1) % MONTHS_IN_YEAR,
            Direction::Backward => (self.cursor + MONTHS_IN_YEAR - 1) % MONTHS_IN_YEAR,
        };
        debug!(cursor = self.cursor, ?direction, "month window moved");
        self.cursor
    }

    pub fn displayed(&self) -> [usize; WINDOW_LEN] {
        displayed_months(self.cursor)
    }

    /// Human label for the visible range, e.g. "March – August".
    pub fn range_label(&self) -> String {
        let months = self.displayed();
        format!(
            "{} \u{2013} {}",
            MONTH_NAMES[months[0]],
            MONTH_NAMES[months[WINDOW_LEN - 1]]
        )
    }
}

/// Calendar month indices shown for a cursor, in cyclic order from the cursor.
pub fn displayed_months(cursor: usize) -> [usize; WINDOW_LEN] {
    std::array::from_fn(|i| (cursor + i) % MONTHS_IN_YEAR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displayed_months_wrap_cyclically() {
        for c in 0..MONTHS_IN_YEAR {
            let months = displayed_months(c);
            for (i, m) in months.iter().enumerate() {
                assert_eq!(*m, (c + i) % 12);
            }
            let mut unique = months.to_vec();
            unique.sort();
            unique.dedup();
            assert_eq!(unique.len(), WINDOW_LEN);
        }
        assert_eq!(displayed_months(9), [9, 10, 11, 0, 1, 2]);
    }

    #[test]
    fn forward_then_backward_is_identity() {
        for c in 0..MONTHS_IN_YEAR {
            let mut w = MonthWindow::starting_at(c);
            w.advance(Direction::Forward);
            w.advance(Direction::Backward);
            assert_eq!(w.cursor(), c);

            w.advance(Direction::Backward);
            w.advance(Direction::Forward);
            assert_eq!(w.cursor(), c);
        }
    }

    #[test]
    fn twelve_steps_return_to_start() {
        for c in 0..MONTHS_IN_YEAR {
            let mut w = MonthWindow::starting_at(c);
            for _ in 0..12 {
                w.advance(Direction::Forward);
            }
            assert_eq!(w.cursor(), c);
            for _ in 0..12 {
                w.advance(Direction::Backward);
            }
            assert_eq!(w.cursor(), c);
        }
    }

    #[test]
    fn backward_from_january_wraps_to_december() {
        let mut w = MonthWindow::default();
        assert_eq!(w.advance(Direction::Backward), 11);
    }

    #[test]
    fn thirteen_forward_presses_land_on_february() {
        let mut w = MonthWindow::default();
        for _ in 0..13 {
            w.advance(Direction::Forward);
        }
        assert_eq!(w.cursor(), 1);
    }

    #[test]
    fn starting_at_reduces_modulo_twelve() {
        assert_eq!(MonthWindow::starting_at(14).cursor(), 2);
    }

    #[test]
    fn range_label_names_first_and_last_month() {
        assert_eq!(MonthWindow::starting_at(10).range_label(), "November \u{2013} April");
    }
}
