use super::cipher::Schedule;
use super::data::*;
use failure::Error;
use std::process;

/// One concrete assignment of the environmental values the target mixed
/// into its key: local time fields, OS version, debugger flag, language id.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchPoint {
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub major: u8,
    pub minor: u8,
    pub debug: u8,
    pub language: u8,
}

impl SearchPoint {
    /// Derive the candidate key for this point. The target stores every sum
    /// in one byte, so all additions wrap modulo 256.
    pub fn key(&self) -> [u8; KEY_LEN] {
        let mut key = [0u8; KEY_LEN];
        key[..4].copy_from_slice(&KEY_PREFIX);
        key[4] = MONTH_OFFSET.wrapping_add(self.month);
        key[5] = DAY_OFFSET.wrapping_add(self.day);
        key[6] = HOUR_OFFSET.wrapping_add(self.hour);
        key[7] = MAJOR_OFFSET.wrapping_add(self.major);
        key[8] = MINOR_OFFSET.wrapping_add(self.minor);
        key[9] = DEBUG_OFFSET.wrapping_add(self.debug);
        key[10] = LANGUAGE_OFFSET.wrapping_add(self.language);
        key
    }
}

/// Inclusive (low, high) range of every search dimension
#[derive(Clone, Debug)]
pub struct Bounds {
    pub month: (u8, u8),
    pub day: (u8, u8),
    pub hour: (u8, u8),
    pub major: (u8, u8),
    pub minor: (u8, u8),
    pub debug: (u8, u8),
    pub language: (u8, u8),
}

impl Default for Bounds {
    /// The full space the target's key can come from: calendar month and
    /// day, hour of day, Windows versions 5.0 through 11.3, the
    /// PEB[BeingDebugged] flag and the primary language identifier.
    fn default() -> Bounds {
        Bounds {
            month: (1, 12),
            day: (1, 31),
            hour: (0, 23),
            major: (5, 11),
            minor: (0, 3),
            debug: (0, 1),
            language: (0, 147),
        }
    }
}

impl Bounds {
    pub fn validate(&self) -> Result<(), Error> {
        let dims = [
            ("month", self.month),
            ("day", self.day),
            ("hour", self.hour),
            ("major version", self.major),
            ("minor version", self.minor),
            ("debug flag", self.debug),
            ("language", self.language),
        ];

        for &(name, (lo, hi)) in dims.iter() {
            if lo > hi {
                return Err(format_err!("invalid {} range: {} > {}", name, lo, hi));
            }
        }
        Ok(())
    }

    /// Number of candidate keys in the space. An inverted range holds no
    /// points, so its span counts as zero.
    pub fn size(&self) -> u64 {
        fn span((lo, hi): (u8, u8)) -> u64 {
            if lo > hi {
                0
            } else {
                (hi - lo) as u64 + 1
            }
        }

        span(self.month)
            * span(self.day)
            * span(self.hour)
            * span(self.major)
            * span(self.minor)
            * span(self.debug)
            * span(self.language)
    }

    pub fn months(&self) -> std::ops::RangeInclusive<u8> {
        self.month.0..=self.month.1
    }
}

/// Brute-force search over a bounded key space, one worker per month value
pub struct Search<'a> {
    ciphertext: &'a [u8],
    bounds: Bounds,
    exit_early: bool,
}

impl<'a> Search<'a> {
    pub fn new(ciphertext: &[u8], bounds: Bounds, exit_early: bool) -> Result<Search, Error> {
        bounds.validate()?;

        // decrypt drops one byte, so the output must still cover the marker
        if ciphertext.len() < MARKER.len() + 1 {
            return Err(format_err!("ciphertext is too small"));
        }

        Ok(Search {
            ciphertext,
            bounds,
            exit_early,
        })
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    /// Run the search to exhaustion and return the number of matches found.
    ///
    /// Matches are printed as they are discovered. In early-exit mode the
    /// first match terminates the whole process with status 1; workers still
    /// enumerating are not joined, so their in-flight output may or may not
    /// appear first.
    pub fn run(&self) -> u32 {
        crossbeam::thread::scope(|scope| {
            let mut units = Vec::new();

            for (idx, month) in self.bounds.months().enumerate() {
                let unit = scope
                    .builder()
                    .name(format!("month-{}", month))
                    .spawn(move |_| {
                        self.scan_unit(month, |point, plain| {
                            report(point, plain);
                            if self.exit_early {
                                process::exit(1);
                            }
                        })
                    });

                match unit {
                    Ok(handle) => units.push(handle),
                    Err(e) => {
                        eprintln!("Could not create thread idx {}: {}", idx, e);
                        process::exit(1);
                    }
                }
            }

            units.into_iter().map(|unit| unit.join().unwrap()).sum()
        })
        .unwrap()
    }

    /// Test every point of one month's slice, invoking the callback on each
    /// match, and return the match count.
    fn scan_unit<F>(&self, month: u8, mut on_match: F) -> u32
    where
        F: FnMut(&SearchPoint, &[u8]),
    {
        let mut found = 0;

        self.for_each_point(month, |point| {
            let plain = Schedule::new(&point.key()).decrypt(self.ciphertext);
            if plain[..MARKER.len()] == MARKER {
                found += 1;
                on_match(&point, &plain);
            }
        });

        found
    }

    /// Enumerate one month's slice of the space, language id innermost
    fn for_each_point<F>(&self, month: u8, mut visit: F)
    where
        F: FnMut(SearchPoint),
    {
        let b = &self.bounds;

        for day in b.day.0..=b.day.1 {
            for hour in b.hour.0..=b.hour.1 {
                for major in b.major.0..=b.major.1 {
                    for minor in b.minor.0..=b.minor.1 {
                        for debug in b.debug.0..=b.debug.1 {
                            for language in b.language.0..=b.language.1 {
                                visit(SearchPoint {
                                    month,
                                    day,
                                    hour,
                                    major,
                                    minor,
                                    debug,
                                    language,
                                });
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Print a decoded message and the point that produced it. The message is
/// cut at its first NUL, like the target's own string handling.
fn report(point: &SearchPoint, plain: &[u8]) {
    let end = plain.iter().position(|&b| b == 0).unwrap_or(plain.len());

    println!("Possible key: {}", String::from_utf8_lossy(&plain[..end]));
    println!(
        "\tMonth: {} Day: {} Hour: {} MajVersion: {} MinVersion: {} PEB[BeingDebugged]: {} Language: {}",
        point.month, point.day, point.hour, point.major, point.minor, point.debug, point.language
    );
}
