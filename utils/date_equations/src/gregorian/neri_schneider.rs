// NOTE: the supported year range is [-271_821, 275_760], which means
// epoch_days.abs() <= 100_000_001.
//
// Neri-Schneider mention shifting for a range of 32_767, so the shift
// needs to be much greater.
//
// (-271_821 / 400).ceil() = s // 680

const EPOCH_COMPUTATIONAL_RATA_DIE: i64 = 719_468;

const DAYS_IN_A_400Y_CYCLE: u32 = 146_097;
const TWO_POWER_THIRTY_NINE: u64 = 549_755_813_888; // 2^39 constant
const TWO_POWER_SIXTEEN: u32 = 65_536; // 2^16 constant

const SHIFTS: i64 = 680;
const YEAR_SHIFT: i64 = 400 * SHIFTS;
const RATA_DIE_SHIFT: i64 = DAYS_IN_A_400Y_CYCLE as i64 * SHIFTS;

// ==== Gregorian date to computational rata die ====

/// Returns the computational rata die (days since 0000-03-01) for a
/// Gregorian date.
///
/// The year is shifted into the positive range before the truncating
/// divisions, so negative years are handled correctly.
pub const fn rata_die_from_gregorian_date(year: i32, month: u8, day: u8) -> i64 {
    let shifted = year as i64 + YEAR_SHIFT;
    let j = (month <= 2) as i64;
    let comp_year = shifted - j;
    let comp_month = month as i64 + 12 * j;
    let comp_day = day as i64 - 1;
    let century = comp_year / 100;
    let y_star = 1461 * comp_year / 4 - century + century / 4;
    let m_star = (979 * comp_month - 2919) / 32;
    y_star + m_star + comp_day - RATA_DIE_SHIFT
}

/// Returns the epoch days for a Gregorian date.
pub const fn epoch_days_from_ymd(year: i32, month: u8, day: u8) -> i64 {
    rata_die_from_gregorian_date(year, month, day) - EPOCH_COMPUTATIONAL_RATA_DIE
}

// ==== Computational rata die to Gregorian date ====

/// Returns C, N_c
const fn first_equations(rata_die: u32) -> (u32, u32) {
    let n_one = 4 * rata_die + 3;
    let century_rem = n_one.rem_euclid(DAYS_IN_A_400Y_CYCLE);
    let century_num = n_one.div_euclid(DAYS_IN_A_400Y_CYCLE);
    (century_num, century_rem)
}

/// Returns Y, N_y
const fn second_equations(rata_die: u32) -> (u32, u32) {
    let (century, rem) = first_equations(rata_die);
    let n_two = rem | 3;
    let year_of_century = (376_287_347 * n_two as u64).div_euclid(TWO_POWER_THIRTY_NINE) as u32;
    let day_of_year = (n_two - 1461 * year_of_century).div_euclid(4);
    (100 * century + year_of_century, day_of_year)
}

/// Returns Y, M, D, N_y
const fn third_equations(rata_die: u32) -> (u32, u32, u32, u32) {
    let (year, day_of_year) = second_equations(rata_die);
    let n_three = 2141 * day_of_year + 197_913;
    let month = n_three.div_euclid(TWO_POWER_SIXTEEN);
    let day = n_three.rem_euclid(TWO_POWER_SIXTEEN).div_euclid(2141);
    (year, month, day, day_of_year)
}

/// Converts a non-negative computational rata die into a Gregorian date.
const fn gregorian_ymd(rata_die: u32) -> (u32, u8, u8) {
    let (year, month, day, day_of_year) = third_equations(rata_die);
    let j = (day_of_year >= 306) as u32;
    (year + j, (month - 12 * j) as u8, (day + 1) as u8)
}

/// Returns the Gregorian (year, month, day) for the provided epoch days.
pub const fn ymd_from_epoch_days(epoch_days: i64) -> (i32, u8, u8) {
    let shifted = epoch_days + EPOCH_COMPUTATIONAL_RATA_DIE + RATA_DIE_SHIFT;
    let (year, month, day) = gregorian_ymd(shifted as u32);
    ((year as i64 - YEAR_SHIFT) as i32, month, day)
}

// ==== Month and weekday utilities ====

/// Returns whether the Gregorian year is a leap year.
pub const fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Returns the number of days in a Gregorian month.
pub const fn days_in_month(year: i32, month: u8) -> u8 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// Returns the ISO weekday (Monday = 1 .. Sunday = 7) of the epoch days.
pub const fn weekday_from_epoch_days(epoch_days: i64) -> u8 {
    // 1970-01-01 was a Thursday.
    ((epoch_days + 3).rem_euclid(7) + 1) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPOCH_RATA_DIE: u32 = 719_468; // This is the Rata Die for 1970-01-01

    #[test]
    fn epoch_ymd() {
        let ymd = gregorian_ymd(EPOCH_RATA_DIE);
        assert_eq!(ymd, (1970, 1, 1));
        assert_eq!(ymd_from_epoch_days(0), (1970, 1, 1));
    }

    #[test]
    fn rata_die_from_date() {
        let epoch_rata_die = rata_die_from_gregorian_date(1970, 1, 1);
        assert_eq!(epoch_rata_die, 719_468);
        let neri_scneider_limit_max_rata_die = rata_die_from_gregorian_date(32767, 12, 31);
        assert_eq!(neri_scneider_limit_max_rata_die, 11_968_205);
        let js_max_rata_die = rata_die_from_gregorian_date(275_760, 9, 14);
        assert_eq!(js_max_rata_die, 100_719_469);
        let js_min_rata_die = rata_die_from_gregorian_date(-271_821, 4, 19);
        assert_eq!(js_min_rata_die, -99_280_533);
    }

    #[test]
    fn epoch_days_limit_to_date() {
        let max_date = ymd_from_epoch_days(100_000_001);
        assert_eq!(max_date, (275_760, 9, 14));
        let min_date = ymd_from_epoch_days(-100_000_001);
        assert_eq!(min_date, (-271_821, 4, 19));
    }

    #[test]
    fn negative_years_round_trip() {
        for (year, month, day) in [(-1, 12, 31), (0, 1, 1), (0, 2, 29), (-400, 3, 1), (-99_999, 1, 1)] {
            let days = epoch_days_from_ymd(year, month, day);
            assert_eq!(ymd_from_epoch_days(days), (year, month, day));
        }
        assert_eq!(
            epoch_days_from_ymd(0, 1, 1) - epoch_days_from_ymd(-1, 12, 31),
            1
        );
    }

    #[test]
    fn month_lengths() {
        assert_eq!(days_in_month(2011, 2), 28);
        assert_eq!(days_in_month(2012, 2), 29);
        assert_eq!(days_in_month(1900, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_month(2011, 6), 30);
        assert_eq!(days_in_month(2011, 7), 31);
    }

    #[test]
    fn weekdays() {
        assert_eq!(weekday_from_epoch_days(0), 4);
        // 2011-05-31 was a Tuesday.
        assert_eq!(weekday_from_epoch_days(epoch_days_from_ymd(2011, 5, 31)), 2);
        // 1969-12-28 was a Sunday.
        assert_eq!(weekday_from_epoch_days(-4), 7);
    }
}
