use std::time::Instant;
use tracing::info;

/// Logs elapsed wall-clock time for a labelled unit of work on drop.
pub struct Timer {
    label: &'static str,
    start: Instant,
}

impl Timer {
    pub fn start(label: &'static str) -> Self {
        info!("Starting: {}", label);
        Self {
            label,
            start: Instant::now(),
        }
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        info!("Finished: {} (took {:.2?})", self.label, self.start.elapsed());
    }
}

/// Format a row count with thousands separators.
pub fn fmt_number(n: usize) -> String {
    let reversed: Vec<char> = n.to_string().chars().rev().collect();
    let mut out = String::with_capacity(reversed.len() + reversed.len() / 3);
    for (i, ch) in reversed.iter().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push(',');
        }
        out.push(*ch);
    }
    out.chars().rev().collect()
}
