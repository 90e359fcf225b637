use std::{collections::BTreeSet, sync::Arc};

use anyhow::{bail, ensure};
use chrono::Datelike;

use tempo_chrono::timepoint::{parse_weekday, Date, DateTime, Time, Weekday};

fn weekday_from_index(index: u32) -> anyhow::Result<Weekday> {
    let weekday = match index {
        1 => Weekday::Mon,
        2 => Weekday::Tue,
        3 => Weekday::Wed,
        4 => Weekday::Thu,
        5 => Weekday::Fri,
        6 => Weekday::Sat,
        7 => Weekday::Sun,
        _ => bail!("weekday index must be in 1..=7: {index}"),
    };
    Ok(weekday)
}

// -----------------------------------------------------------------------------
// _PolicyData
// -----------------------------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq)]
struct _PolicyData {
    /// The month (1-12) on which the fiscal year begins.
    fiscal_year_start_month: u32,

    /// The weekdays counted as workdays, sorted from Monday and deduplicated.
    workdays: Vec<Weekday>,

    /// Daily business hours. `start_of_business <= end_of_business` holds.
    start_of_business: Time,
    end_of_business: Time,

    /// The holiday dates of the calendar.
    holidays: BTreeSet<Date>,
}

//
// ser/de
//
/// A weekday in configuration data: an ISO index (1 = Monday .. 7 = Sunday)
/// or a name such as `"mon"` / `"monday"`.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, schemars::JsonSchema)]
#[serde(untagged)]
enum WeekdaySpec {
    Index(u32),
    Name(String),
}

impl WeekdaySpec {
    fn resolve(&self) -> anyhow::Result<Weekday> {
        match self {
            WeekdaySpec::Index(index) => weekday_from_index(*index),
            WeekdaySpec::Name(name) => parse_weekday(name),
        }
    }
}

fn _default_fy_start_month() -> u32 {
    1
}
fn _default_workdays() -> Vec<WeekdaySpec> {
    (1..=5).map(WeekdaySpec::Index).collect()
}
fn _default_start_of_business() -> Time {
    Time::from_hms_opt(9, 0, 0).expect("09:00:00 must be a valid time")
}
fn _default_end_of_business() -> Time {
    Time::from_hms_opt(17, 0, 0).expect("17:00:00 must be a valid time")
}

#[derive(serde::Serialize, serde::Deserialize, schemars::JsonSchema)]
struct _PolicySchema {
    #[serde(default = "_default_fy_start_month")]
    fiscal_year_start_month: u32,
    #[serde(default = "_default_workdays")]
    workdays: Vec<WeekdaySpec>,
    #[serde(default = "_default_start_of_business")]
    start_of_business: Time,
    #[serde(default = "_default_end_of_business")]
    end_of_business: Time,
    #[serde(default)]
    holidays: BTreeSet<Date>,
}

impl serde::Serialize for _PolicyData {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        _PolicySchema {
            fiscal_year_start_month: self.fiscal_year_start_month,
            workdays: self
                .workdays
                .iter()
                .map(|w| WeekdaySpec::Index(w.number_from_monday()))
                .collect(),
            start_of_business: self.start_of_business,
            end_of_business: self.end_of_business,
            holidays: self.holidays.clone(),
        }
        .serialize(serializer)
    }
}

impl<'de> serde::Deserialize<'de> for _PolicyData {
    fn deserialize<D>(deserializer: D) -> Result<_PolicyData, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let schema = _PolicySchema::deserialize(deserializer)?;
        let workdays = schema
            .workdays
            .iter()
            .map(WeekdaySpec::resolve)
            .collect::<anyhow::Result<Vec<_>>>()
            .map_err(serde::de::Error::custom)?;
        _PolicyData::new(
            schema.fiscal_year_start_month,
            workdays,
            schema.start_of_business,
            schema.end_of_business,
            schema.holidays,
        )
        .map_err(serde::de::Error::custom)
    }
}

//
// ctor
//
impl _PolicyData {
    fn new(
        fiscal_year_start_month: u32,
        mut workdays: Vec<Weekday>,
        start_of_business: Time,
        end_of_business: Time,
        holidays: BTreeSet<Date>,
    ) -> anyhow::Result<Self> {
        ensure!(
            (1..=12).contains(&fiscal_year_start_month),
            "fiscal year start month must be in 1..=12: {fiscal_year_start_month}"
        );
        ensure!(
            start_of_business <= end_of_business,
            "business hours must not be inverted: start_of_business={start_of_business}, end_of_business={end_of_business}",
        );

        workdays.sort_by_key(|w| w.number_from_monday());
        workdays.dedup();

        Ok(Self {
            fiscal_year_start_month,
            workdays,
            start_of_business,
            end_of_business,
            holidays,
        })
    }
}

// -----------------------------------------------------------------------------
// CalendarPolicy
// -----------------------------------------------------------------------------
/// Immutable business calendar configuration
///
/// # Overview
/// A policy bundles the four facts business-day arithmetic depends on:
/// which weekdays count as workdays, the daily business-hours span, the
/// holiday dates, and the month on which the fiscal year begins. It exposes
/// pure predicates over dates and times plus the "fraction of the business
/// day elapsed" function the fractional-day accumulator builds on.
///
/// ```
/// use chrono::NaiveDate;
/// use tempo_bizcal::policy::CalendarPolicy;
///
/// let ymd = |y: i32, m: u32, d: u32| {
///     NaiveDate::from_ymd_opt(y, m, d).unwrap()
/// };
///
/// // Mon-Fri, 09:00-17:00, fiscal year from January, no holidays
/// let policy = CalendarPolicy::default();
///
/// assert!(policy.is_workday(ymd(2024, 1, 1)));   // Monday
/// assert!(!policy.is_workday(ymd(2024, 1, 6)));  // Saturday
///
/// let policy = CalendarPolicy::builder()
///     .with_holidays([ymd(2024, 1, 1)])
///     .build()
///     .unwrap();
/// assert!(policy.is_holiday(ymd(2024, 1, 1)));
/// assert!(!policy.is_business_day(ymd(2024, 1, 1)));
/// ```
///
/// # Lightweight
/// The internal data is wrapped by an immutable [`Arc`], so cloning a policy
/// is cheap and sharing one across threads is safe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarPolicy(Arc<_PolicyData>);

//
// ser/de
//
impl serde::Serialize for CalendarPolicy {
    #[inline]
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> serde::Deserialize<'de> for CalendarPolicy {
    #[inline]
    fn deserialize<D>(deserializer: D) -> Result<CalendarPolicy, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let data = _PolicyData::deserialize(deserializer)?;
        Ok(CalendarPolicy(Arc::new(data)))
    }
}

impl schemars::JsonSchema for CalendarPolicy {
    fn schema_name() -> String {
        "CalendarPolicy".to_string()
    }
    fn schema_id() -> std::borrow::Cow<'static, str> {
        "tempo_bizcal::policy::CalendarPolicy".into()
    }
    fn json_schema(gen: &mut schemars::gen::SchemaGenerator) -> schemars::schema::Schema {
        <_PolicySchema as schemars::JsonSchema>::json_schema(gen)
    }
}

//
// construction
//
impl Default for CalendarPolicy {
    #[inline]
    fn default() -> Self {
        Self::builder()
            .build()
            .expect("default policy must be valid")
    }
}

impl CalendarPolicy {
    /// Get [CalendarPolicyBuilder] instance.
    #[inline]
    pub fn builder() -> CalendarPolicyBuilder {
        CalendarPolicyBuilder::default()
    }
}

//
// getters
//
impl CalendarPolicy {
    /// The month (1-12) on which the fiscal year begins.
    #[inline]
    pub fn fiscal_year_start_month(&self) -> u32 {
        self.0.fiscal_year_start_month
    }

    /// The weekdays counted as workdays, sorted from Monday.
    #[inline]
    pub fn workdays(&self) -> &[Weekday] {
        &self.0.workdays
    }

    #[inline]
    pub fn start_of_business(&self) -> Time {
        self.0.start_of_business
    }

    #[inline]
    pub fn end_of_business(&self) -> Time {
        self.0.end_of_business
    }

    /// The holiday dates of the calendar.
    #[inline]
    pub fn holidays(&self) -> &BTreeSet<Date> {
        &self.0.holidays
    }
}

//
// methods
//
impl CalendarPolicy {
    /// Check if the given weekday counts as a workday.
    #[inline]
    pub fn is_working_weekday(&self, weekday: Weekday) -> bool {
        self.0.workdays.contains(&weekday)
    }

    /// Check if the given date falls on a workday weekday. Holidays are not
    /// consulted.
    #[inline]
    pub fn is_workday(&self, date: Date) -> bool {
        self.is_working_weekday(date.weekday())
    }

    /// Check if the given date is a holiday.
    #[inline]
    pub fn is_holiday(&self, date: Date) -> bool {
        self.0.holidays.contains(&date)
    }

    /// Check if the given date is a business day, a workday which is not a
    /// holiday.
    #[inline]
    pub fn is_business_day(&self, date: Date) -> bool {
        self.is_workday(date) && !self.is_holiday(date)
    }

    /// Check if the given time of day falls within business hours,
    /// half-open on the closing side.
    #[inline]
    pub fn is_business_time(&self, time: Time) -> bool {
        self.0.start_of_business <= time && time < self.0.end_of_business
    }

    /// Fraction of the business day elapsed at the given instant, holidays
    /// and non-workdays contributing 0.0.
    ///
    /// 0.0 at or before the start of business, 1.0 at or after the end,
    /// linear in between. The date is re-checked against workdays and
    /// holidays even when callers have already filtered; a zero-length
    /// business day is complete from its start instant on.
    pub fn business_day_fraction(&self, at: DateTime) -> f64 {
        if !self.is_business_day(at.date()) {
            return 0.0;
        }
        self.workday_fraction(at)
    }

    /// Fraction of the business hours elapsed at the given instant.
    ///
    /// Only the time of day is consulted: the date's workday and holiday
    /// status is deliberately ignored, so a Saturday noon yields the same
    /// fraction as a Monday noon. Callers that want non-workdays to read
    /// 0.0 use [`business_day_fraction`](Self::business_day_fraction),
    /// which adds that gate.
    pub fn workday_fraction(&self, at: DateTime) -> f64 {
        let total = (self.0.end_of_business - self.0.start_of_business).num_seconds() as f64;
        let elapsed = (at.time() - self.0.start_of_business).num_seconds() as f64;
        if total <= 0.0 {
            // zero-length business day
            return if elapsed >= 0.0 { 1.0 } else { 0.0 };
        }
        if elapsed <= 0.0 {
            0.0
        } else if elapsed >= total {
            1.0
        } else {
            elapsed / total
        }
    }
}

// -----------------------------------------------------------------------------
// CalendarPolicyBuilder
// -----------------------------------------------------------------------------
/// Builder of a calendar policy
///
/// Every field has the documented default (fiscal year from January,
/// Mon-Fri workdays, 09:00-17:00 business hours, no holidays), so any
/// subset of the `with_*` methods may be called before [`build`].
///
/// [`build`]: CalendarPolicyBuilder::build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarPolicyBuilder {
    fiscal_year_start_month: u32,
    workdays: Vec<Weekday>,
    start_of_business: Time,
    end_of_business: Time,
    holidays: BTreeSet<Date>,
}

impl Default for CalendarPolicyBuilder {
    #[inline]
    fn default() -> Self {
        Self {
            fiscal_year_start_month: _default_fy_start_month(),
            workdays: vec![
                Weekday::Mon,
                Weekday::Tue,
                Weekday::Wed,
                Weekday::Thu,
                Weekday::Fri,
            ],
            start_of_business: _default_start_of_business(),
            end_of_business: _default_end_of_business(),
            holidays: BTreeSet::new(),
        }
    }
}

impl CalendarPolicyBuilder {
    pub fn with_fiscal_year_start_month(mut self, month: u32) -> Self {
        self.fiscal_year_start_month = month;
        self
    }

    pub fn with_workdays(mut self, workdays: impl IntoIterator<Item = Weekday>) -> Self {
        self.workdays = workdays.into_iter().collect();
        self
    }

    pub fn with_business_hours(mut self, start: Time, end: Time) -> Self {
        self.start_of_business = start;
        self.end_of_business = end;
        self
    }

    pub fn with_holidays(mut self, holidays: impl IntoIterator<Item = Date>) -> Self {
        self.holidays = holidays.into_iter().collect();
        self
    }

    /// Build a new policy from the given data.
    ///
    /// # Errors
    /// - If the fiscal year start month is outside `1..=12`
    /// - If the business hours are inverted (`start > end`)
    pub fn build(self) -> anyhow::Result<CalendarPolicy> {
        _PolicyData::new(
            self.fiscal_year_start_month,
            self.workdays,
            self.start_of_business,
            self.end_of_business,
            self.holidays,
        )
        .map(Arc::new)
        .map(CalendarPolicy)
    }
}

#[cfg(test)]
mod tests {
    use maplit::btreeset;
    use rstest::rstest;

    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd_opt(y, m, d).unwrap()
    }

    fn hms(h: u32, m: u32, s: u32) -> Time {
        Time::from_hms_opt(h, m, s).unwrap()
    }

    #[test]
    fn test_default_policy() {
        let policy = CalendarPolicy::default();

        assert_eq!(policy.fiscal_year_start_month(), 1);
        assert_eq!(
            policy.workdays(),
            &[
                Weekday::Mon,
                Weekday::Tue,
                Weekday::Wed,
                Weekday::Thu,
                Weekday::Fri
            ]
        );
        assert_eq!(policy.start_of_business(), hms(9, 0, 0));
        assert_eq!(policy.end_of_business(), hms(17, 0, 0));
        assert!(policy.holidays().is_empty());
    }

    #[rstest]
    #[case(0)]
    #[case(13)]
    fn test_build_ng_fiscal_month(#[case] month: u32) {
        let policy = CalendarPolicy::builder()
            .with_fiscal_year_start_month(month)
            .build();

        assert!(policy.is_err());
    }

    #[test]
    fn test_build_ng_inverted_hours() {
        let policy = CalendarPolicy::builder()
            .with_business_hours(hms(17, 0, 0), hms(9, 0, 0))
            .build();

        assert!(policy.is_err());
    }

    #[test]
    fn test_build_sorts_and_dedups_workdays() {
        let policy = CalendarPolicy::builder()
            .with_workdays([Weekday::Fri, Weekday::Mon, Weekday::Fri])
            .build()
            .unwrap();

        assert_eq!(policy.workdays(), &[Weekday::Mon, Weekday::Fri]);
    }

    #[test]
    fn test_predicates() {
        let policy = CalendarPolicy::builder()
            .with_holidays([ymd(2024, 1, 3)])
            .build()
            .unwrap();

        assert!(policy.is_working_weekday(Weekday::Wed));
        assert!(!policy.is_working_weekday(Weekday::Sun));

        assert!(policy.is_workday(ymd(2024, 1, 3))); // Wed, holiday status ignored
        assert!(policy.is_holiday(ymd(2024, 1, 3)));
        assert!(!policy.is_business_day(ymd(2024, 1, 3)));

        assert!(policy.is_business_day(ymd(2024, 1, 4)));
        assert!(!policy.is_business_day(ymd(2024, 1, 6))); // Sat
    }

    #[test]
    fn test_is_business_time() {
        let policy = CalendarPolicy::default();

        assert!(!policy.is_business_time(hms(8, 59, 59)));
        assert!(policy.is_business_time(hms(9, 0, 0)));
        assert!(policy.is_business_time(hms(16, 59, 59)));
        assert!(!policy.is_business_time(hms(17, 0, 0)));
    }

    #[rstest]
    #[case(hms(8, 0, 0), 0.0)]
    #[case(hms(9, 0, 0), 0.0)]
    #[case(hms(12, 0, 0), 0.375)]
    #[case(hms(15, 0, 0), 0.75)]
    #[case(hms(17, 0, 0), 1.0)]
    #[case(hms(23, 0, 0), 1.0)]
    fn test_business_day_fraction(#[case] time: Time, #[case] expected: f64) {
        let policy = CalendarPolicy::default();

        // 2024-01-01 is a Monday
        let frac = policy.business_day_fraction(ymd(2024, 1, 1).and_time(time));

        assert_eq!(frac, expected);
    }

    #[test]
    fn test_business_day_fraction_on_holiday() {
        let policy = CalendarPolicy::builder()
            .with_holidays([ymd(2024, 1, 1)])
            .build()
            .unwrap();

        let frac = policy.business_day_fraction(ymd(2024, 1, 1).and_time(hms(12, 0, 0)));

        assert_eq!(frac, 0.0);
    }

    #[test]
    fn test_workday_fraction_ignores_holidays() {
        let policy = CalendarPolicy::builder()
            .with_holidays([ymd(2024, 1, 1)])
            .build()
            .unwrap();

        let frac = policy.workday_fraction(ymd(2024, 1, 1).and_time(hms(12, 0, 0)));

        assert_eq!(frac, 0.375);
    }

    #[test]
    fn test_workday_fraction_ignores_weekday() {
        let policy = CalendarPolicy::default();

        // 2024-01-06 is a Saturday
        let saturday_noon = ymd(2024, 1, 6).and_time(hms(12, 0, 0));

        assert_eq!(policy.workday_fraction(saturday_noon), 0.375);
        assert_eq!(policy.business_day_fraction(saturday_noon), 0.0);
    }

    #[test]
    fn test_zero_length_business_day() {
        let policy = CalendarPolicy::builder()
            .with_business_hours(hms(12, 0, 0), hms(12, 0, 0))
            .build()
            .unwrap();

        let day = ymd(2024, 1, 1);
        assert_eq!(policy.workday_fraction(day.and_time(hms(11, 59, 59))), 0.0);
        assert_eq!(policy.workday_fraction(day.and_time(hms(12, 0, 0))), 1.0);
        assert_eq!(policy.workday_fraction(day.and_time(hms(13, 0, 0))), 1.0);
    }

    #[test]
    fn test_serialize() {
        let policy = CalendarPolicy::builder()
            .with_fiscal_year_start_month(4)
            .with_workdays([Weekday::Mon, Weekday::Tue])
            .with_holidays([ymd(2024, 1, 1)])
            .build()
            .unwrap();

        let json = serde_json::to_value(&policy).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "fiscal_year_start_month": 4,
                "workdays": [1, 2],
                "start_of_business": "09:00:00",
                "end_of_business": "17:00:00",
                "holidays": ["2024-01-01"]
            })
        );
    }

    #[test]
    fn test_deserialize() {
        let json = serde_json::json!({
            "fiscal_year_start_month": 4,
            "workdays": [1, 2, 3],
            "start_of_business": "08:30:00",
            "end_of_business": "16:30:00",
            "holidays": ["2024-01-01", "2024-12-25"]
        });

        let policy: CalendarPolicy = serde_json::from_value(json).unwrap();

        assert_eq!(policy.fiscal_year_start_month(), 4);
        assert_eq!(
            policy.workdays(),
            &[Weekday::Mon, Weekday::Tue, Weekday::Wed]
        );
        assert_eq!(policy.start_of_business(), hms(8, 30, 0));
        assert_eq!(policy.end_of_business(), hms(16, 30, 0));
        assert_eq!(
            policy.holidays(),
            &btreeset! {ymd(2024, 1, 1), ymd(2024, 12, 25)}
        );
    }

    #[test]
    fn test_deserialize_defaults() {
        let policy: CalendarPolicy = serde_json::from_value(serde_json::json!({})).unwrap();

        assert_eq!(policy, CalendarPolicy::default());
    }

    #[test]
    fn test_deserialize_weekday_names() {
        let json = serde_json::json!({
            "workdays": ["mon", "WEDNESDAY", "w-fri"]
        });

        let policy: CalendarPolicy = serde_json::from_value(json).unwrap();

        assert_eq!(
            policy.workdays(),
            &[Weekday::Mon, Weekday::Wed, Weekday::Fri]
        );
    }

    #[test]
    fn test_deserialize_ng_fiscal_month() {
        let json = serde_json::json!({"fiscal_year_start_month": 13});

        let policy: Result<CalendarPolicy, _> = serde_json::from_value(json);

        assert!(policy.is_err());
    }

    #[test]
    fn test_roundtrip() {
        let policy = CalendarPolicy::builder()
            .with_fiscal_year_start_month(7)
            .with_business_hours(hms(10, 0, 0), hms(18, 0, 0))
            .with_holidays([ymd(2024, 7, 4)])
            .build()
            .unwrap();

        let json = serde_json::to_value(&policy).unwrap();
        let back: CalendarPolicy = serde_json::from_value(json).unwrap();

        assert_eq!(back, policy);
    }
}
