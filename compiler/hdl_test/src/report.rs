//! Progress banners for a test run.
//!
//! The report is a side channel: a banner that cannot be written is logged
//! and dropped, never turned into a test failure.

use std::fmt;
use std::io::Write;

/// Padding before `FAILED` for a unit test.
pub const UNIT_SPACES: usize = 7;
/// Padding before `FAILED` for a quickcheck. The seed field is one wider.
pub const QUICKCHECK_SPACES: usize = 15;

/// Writes the fixed-width banner lines of a test run.
pub struct Reporter<W: Write> {
    writer: W,
}

impl<W: Write> Reporter<W> {
    pub fn new(writer: W) -> Self {
        Reporter { writer }
    }

    pub fn writer_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn line(&mut self, args: fmt::Arguments<'_>) {
        let result = self
            .writer
            .write_fmt(args)
            .and_then(|()| self.writer.write_all(b"\n"));
        if let Err(e) = result {
            tracing::warn!("failed to write test report: {e}");
        }
    }

    pub fn run_unit_test(&mut self, name: &str) {
        self.line(format_args!("[ RUN UNITTEST  ] {name}"));
    }

    pub fn unit_test_ok(&mut self) {
        self.line(format_args!("[            OK ]"));
    }

    pub fn failed(&mut self, name: &str, suffix: &str, is_quickcheck: bool) {
        let spaces = if is_quickcheck {
            QUICKCHECK_SPACES
        } else {
            UNIT_SPACES
        };
        self.line(format_args!("[ {:spaces$}FAILED ] {name}{suffix}", ""));
    }

    pub fn unit_summary(&mut self, ran: usize, failed: usize, skipped: usize) {
        self.line(format_args!(
            "[===============] {ran} test(s) ran; {failed} failed; {skipped} skipped."
        ));
    }

    pub fn skipping_quickchecks(&mut self) {
        self.line(format_args!("[ SKIPPING QUICKCHECKS  ] (JIT is disabled)"));
    }

    pub fn seed(&mut self, seed: u64) {
        let width = QUICKCHECK_SPACES + 1;
        self.line(format_args!("[ SEED {seed:>width$} ]"));
    }

    pub fn run_quickcheck(&mut self, name: &str, count: u64) {
        self.line(format_args!("[ RUN QUICKCHECK        ] {name} count: {count}"));
    }

    pub fn quickcheck_ok(&mut self, name: &str) {
        self.line(format_args!("[                    OK ] {name}"));
    }

    pub fn quickcheck_summary(&mut self, count: usize) {
        self.line(format_args!("[=======================] {count} quickcheck(s) ran."));
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io;

    fn report(f: impl FnOnce(&mut Reporter<Vec<u8>>)) -> String {
        let mut reporter = Reporter::new(Vec::new());
        f(&mut reporter);
        String::from_utf8(reporter.into_inner()).unwrap()
    }

    #[test]
    fn test_unit_banners() {
        let out = report(|r| {
            r.run_unit_test("t1");
            r.unit_test_ok();
            r.failed("t2", "", false);
            r.unit_summary(2, 1, 0);
        });
        assert_eq!(
            out,
            "[ RUN UNITTEST  ] t1\n\
             [            OK ]\n\
             [        FAILED ] t2\n\
             [===============] 2 test(s) ran; 1 failed; 0 skipped.\n"
        );
    }

    #[test]
    fn test_quickcheck_banners() {
        let out = report(|r| {
            r.seed(42);
            r.run_quickcheck("qc1", 50);
            r.quickcheck_ok("qc1");
            r.failed("qc2", ": internal error: boom", true);
            r.quickcheck_summary(2);
        });
        assert_eq!(
            out,
            "[ SEED               42 ]\n\
             [ RUN QUICKCHECK        ] qc1 count: 50\n\
             [                    OK ] qc1\n\
             [                FAILED ] qc2: internal error: boom\n\
             [=======================] 2 quickcheck(s) ran.\n"
        );
    }

    #[test]
    fn test_banner_columns_line_up() {
        let out = report(|r| {
            r.run_unit_test("t");
            r.failed("t", "", false);
            r.run_quickcheck("q", 1);
            r.failed("q", "", true);
            r.seed(1234);
        });
        let widths: Vec<usize> = out.lines().map(|l| l.find(']').unwrap()).collect();
        assert_eq!(widths[0], widths[1]);
        assert_eq!(widths[2], widths[3]);
        assert_eq!(widths[3], widths[4]);
    }

    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_failure_is_ignored() {
        let mut reporter = Reporter::new(Broken);
        reporter.run_unit_test("t");
        reporter.unit_summary(0, 0, 0);
    }
}
