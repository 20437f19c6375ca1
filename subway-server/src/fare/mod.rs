//! Fare calculation.
//!
//! Fares are tiered by distance: a base fare covers the first few
//! kilometres, then each band adds a fixed amount per started increment of
//! distance inside it. The default table is the Wuhan metro's.

use std::fmt;
use std::str::FromStr;

/// Slack absorbed before rounding an increment count up, so a distance
/// summed from float hop lengths (e.g. 3.3 + 0.9) that lands a hair past a
/// band edge isn't charged an extra increment.
const INCREMENT_EPSILON: f64 = 1e-9;

/// Error building a [`FareTable`] or parsing a [`FareMode`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FareTableError {
    /// A band's increment distance isn't positive
    #[error("band starting at {start_km} km has non-positive increment {step_km} km")]
    NonPositiveIncrement { start_km: f64, step_km: f64 },

    /// A band ends before it starts
    #[error("band starting at {start_km} km ends at {end_km} km")]
    EmptyBand { start_km: f64, end_km: f64 },

    /// Bands don't follow each other without gaps or overlaps
    #[error("band starting at {start_km} km doesn't follow the previous band ending at {previous_end_km} km")]
    NotContiguous { start_km: f64, previous_end_km: f64 },

    /// Only the last band may be open-ended
    #[error("open-ended band starting at {0} km isn't the last band")]
    OpenBandNotLast(f64),

    /// A price or multiplier is negative or not a number
    #[error("invalid price: {0}")]
    InvalidPrice(f64),

    /// Unrecognised fare mode name
    #[error("unknown fare mode: {0}")]
    UnknownMode(String),
}

/// One distance band of the tiered fare.
#[derive(Debug, Clone, PartialEq)]
pub struct FareBand {
    /// Distance at which the band starts charging.
    pub start_km: f64,
    /// Distance at which the band stops; `None` for the final, open band.
    pub end_km: Option<f64>,
    /// Length of one charged increment.
    pub step_km: f64,
    /// Price of one increment.
    pub step_fare: f64,
}

impl FareBand {
    pub fn new(start_km: f64, end_km: Option<f64>, step_km: f64, step_fare: f64) -> Self {
        Self {
            start_km,
            end_km,
            step_km,
            step_fare,
        }
    }

    /// Charge for the part of `distance` that falls inside this band.
    fn charge(&self, distance: f64) -> f64 {
        if distance <= self.start_km {
            return 0.0;
        }
        let upper = self.end_km.map_or(distance, |end| distance.min(end));
        let in_band = upper - self.start_km;
        let increments = (in_band / self.step_km - INCREMENT_EPSILON).ceil().max(0.0);
        increments * self.step_fare
    }
}

/// Period (multi-day) tickets sold at a flat price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PeriodTicket {
    OneDay,
    ThreeDay,
    SevenDay,
}

impl PeriodTicket {
    /// Shortest validity first.
    pub const ALL: [PeriodTicket; 3] = [
        PeriodTicket::OneDay,
        PeriodTicket::ThreeDay,
        PeriodTicket::SevenDay,
    ];

    /// Days of unlimited riding one ticket covers.
    pub fn days(self) -> u32 {
        match self {
            PeriodTicket::OneDay => 1,
            PeriodTicket::ThreeDay => 3,
            PeriodTicket::SevenDay => 7,
        }
    }
}

/// How a ride is paid for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FareMode {
    /// Full tiered fare.
    #[default]
    Normal,
    /// Tiered fare times the stored-value card multiplier.
    Discounted,
    /// Flat period-ticket price, whatever the distance.
    Period(PeriodTicket),
}

impl FromStr for FareMode {
    type Err = FareTableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" => Ok(FareMode::Normal),
            "discounted" => Ok(FareMode::Discounted),
            "one_day" => Ok(FareMode::Period(PeriodTicket::OneDay)),
            "three_day" => Ok(FareMode::Period(PeriodTicket::ThreeDay)),
            "seven_day" => Ok(FareMode::Period(PeriodTicket::SevenDay)),
            _ => Err(FareTableError::UnknownMode(s.to_string())),
        }
    }
}

impl fmt::Display for FareMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FareMode::Normal => "normal",
            FareMode::Discounted => "discounted",
            FareMode::Period(PeriodTicket::OneDay) => "one_day",
            FareMode::Period(PeriodTicket::ThreeDay) => "three_day",
            FareMode::Period(PeriodTicket::SevenDay) => "seven_day",
        };
        f.write_str(name)
    }
}

/// Flat prices of the period tickets.
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodPrices {
    pub one_day: f64,
    pub three_day: f64,
    pub seven_day: f64,
}

impl PeriodPrices {
    pub fn price(&self, ticket: PeriodTicket) -> f64 {
        match ticket {
            PeriodTicket::OneDay => self.one_day,
            PeriodTicket::ThreeDay => self.three_day,
            PeriodTicket::SevenDay => self.seven_day,
        }
    }
}

impl Default for PeriodPrices {
    fn default() -> Self {
        Self {
            one_day: 18.0,
            three_day: 45.0,
            seven_day: 90.0,
        }
    }
}

/// A complete, validated fare table.
#[derive(Debug, Clone, PartialEq)]
pub struct FareTable {
    base_fare: f64,
    bands: Vec<FareBand>,
    discount: f64,
    period: PeriodPrices,
}

impl FareTable {
    /// Create a table, checking that bands are well formed and follow each
    /// other without gaps.
    pub fn new(
        base_fare: f64,
        bands: Vec<FareBand>,
        discount: f64,
        period: PeriodPrices,
    ) -> Result<Self, FareTableError> {
        for price in [base_fare, discount, period.one_day, period.three_day, period.seven_day] {
            if !price.is_finite() || price < 0.0 {
                return Err(FareTableError::InvalidPrice(price));
            }
        }

        let mut previous_end: Option<f64> = None;
        for (i, band) in bands.iter().enumerate() {
            if band.step_km.is_nan() || band.step_km <= 0.0 {
                return Err(FareTableError::NonPositiveIncrement {
                    start_km: band.start_km,
                    step_km: band.step_km,
                });
            }
            if !band.step_fare.is_finite() || band.step_fare < 0.0 {
                return Err(FareTableError::InvalidPrice(band.step_fare));
            }
            if let Some(prev) = previous_end {
                if band.start_km != prev {
                    return Err(FareTableError::NotContiguous {
                        start_km: band.start_km,
                        previous_end_km: prev,
                    });
                }
            }
            match band.end_km {
                Some(end) if end <= band.start_km => {
                    return Err(FareTableError::EmptyBand {
                        start_km: band.start_km,
                        end_km: end,
                    });
                }
                Some(end) => previous_end = Some(end),
                None if i + 1 != bands.len() => {
                    return Err(FareTableError::OpenBandNotLast(band.start_km));
                }
                None => {}
            }
        }

        Ok(Self {
            base_fare,
            bands,
            discount,
            period,
        })
    }

    pub fn base_fare(&self) -> f64 {
        self.base_fare
    }

    pub fn bands(&self) -> &[FareBand] {
        &self.bands
    }

    /// Distance covered by the base fare alone.
    pub fn first_threshold(&self) -> Option<f64> {
        self.bands.first().map(|b| b.start_km)
    }

    pub fn discount(&self) -> f64 {
        self.discount
    }

    pub fn period_prices(&self) -> &PeriodPrices {
        &self.period
    }

    /// Price of a ride of `distance` kilometres.
    ///
    /// A zero, negative or non-finite distance is no ride and costs nothing
    /// in every mode. Otherwise the result never decreases as distance
    /// grows.
    pub fn fare(&self, distance: f64, mode: FareMode) -> f64 {
        if !distance.is_finite() || distance <= 0.0 {
            return 0.0;
        }
        match mode {
            FareMode::Normal => round_cents(self.tiered(distance)),
            FareMode::Discounted => round_cents(self.tiered(distance) * self.discount),
            FareMode::Period(ticket) => self.period.price(ticket),
        }
    }

    /// Average cost per ride of a period ticket used `rides` times.
    ///
    /// Zero rides is treated as one.
    pub fn per_ride_cost(&self, ticket: PeriodTicket, rides: u32) -> f64 {
        round_cents(self.period.price(ticket) / f64::from(rides.max(1)))
    }

    /// Cheapest period ticket for a trip, or `None` if paying the normal
    /// fare for every ride costs no more.
    ///
    /// The trip is `days` days of `rides_per_day` rides of about
    /// `ride_distance` km each. A ticket type covers the trip with as many
    /// back-to-back copies as needed; on equal cost the shorter ticket
    /// wins.
    pub fn recommend_period_ticket(
        &self,
        rides_per_day: u32,
        days: u32,
        ride_distance: f64,
    ) -> Option<PeriodTicket> {
        let rides = f64::from(rides_per_day) * f64::from(days);
        let pay_as_you_go = round_cents(rides * self.fare(ride_distance, FareMode::Normal));

        let mut best: Option<(PeriodTicket, f64)> = None;
        for ticket in PeriodTicket::ALL {
            let copies = days.div_ceil(ticket.days());
            let cost = round_cents(f64::from(copies) * self.period.price(ticket));
            let cheapest = best.map_or(pay_as_you_go, |(_, c)| c.min(pay_as_you_go));
            if cost < cheapest {
                best = Some((ticket, cost));
            }
        }
        best.map(|(ticket, _)| ticket)
    }

    fn tiered(&self, distance: f64) -> f64 {
        self.base_fare
            + self
                .bands
                .iter()
                .map(|band| band.charge(distance))
                .sum::<f64>()
    }
}

impl Default for FareTable {
    /// The Wuhan metro fare table.
    fn default() -> Self {
        Self {
            base_fare: 2.0,
            bands: vec![
                FareBand::new(4.0, Some(12.0), 4.0, 1.0),
                FareBand::new(12.0, Some(24.0), 6.0, 1.0),
                FareBand::new(24.0, Some(40.0), 8.0, 1.0),
                FareBand::new(40.0, Some(50.0), 10.0, 1.0),
                FareBand::new(50.0, None, 20.0, 1.0),
            ],
            discount: 0.9,
            period: PeriodPrices::default(),
        }
    }
}

/// Formats an amount as `¥5.00`.
pub fn format_fare(amount: f64) -> String {
    format!("¥{amount:.2}")
}

fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}
