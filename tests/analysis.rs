mod common;

use hotel_bookings::analysis::{self, CountryCount};
use hotel_bookings::booking::{Booking, CITY_HOTEL, RESORT_HOTEL};
use hotel_bookings::error::ErrorKind;

use common::{arriving, booking, cancelled, city_booking, from_country};

fn names<T, F: Fn(&T) -> String>(rows: &[T], f: F) -> Vec<String> {
    rows.iter().map(f).collect()
}

#[test]
fn top_countries_counts_only_active_bookings() {
    let mut table = vec![
        from_country("PRT"),
        from_country("USA"),
        from_country("PRT"),
        from_country("PRT"),
    ];
    table.extend((0..5).map(|_| cancelled(from_country("USA"))));

    let top = analysis::top_countries(&table);
    assert_eq!(
        top,
        vec![CountryCount::from(("PRT", 3)), CountryCount::from(("USA", 1))]
    );
}

#[test]
fn top_countries_keeps_five_in_descending_order() {
    let mut table = Vec::new();
    for (country, n) in [("GBR", 2), ("PRT", 7), ("FRA", 4), ("ESP", 5), ("DEU", 3), ("ITA", 1), ("IRL", 6)] {
        table.extend((0..n).map(|_| from_country(country)));
    }
    table.push(Booking {
        country: None,
        ..booking()
    });

    let top = analysis::top_countries(&table);
    assert_eq!(top.len(), 5);
    assert!(top.windows(2).all(|w| w[0].count_of_bookings > w[1].count_of_bookings));
    assert_eq!(
        names(&top, |c| c.country.clone()),
        vec!["PRT", "IRL", "ESP", "FRA", "DEU"]
    );
}

#[test]
fn repeat_guest_rate_spans_zero_to_hundred() {
    let none: Vec<Booking> = (0..10).map(|_| booking()).collect();
    assert_eq!(
        analysis::repeat_guest_rate(&none).unwrap().repeated_guests_percentage,
        0.0
    );

    let all: Vec<Booking> = (0..10)
        .map(|_| Booking {
            is_repeated_guest: true,
            ..booking()
        })
        .collect();
    assert_eq!(
        analysis::repeat_guest_rate(&all).unwrap().repeated_guests_percentage,
        100.0
    );
}

#[test]
fn repeat_guest_rate_rounds_to_two_places() {
    let mut table: Vec<Booking> = (0..2).map(|_| booking()).collect();
    table.push(Booking {
        is_repeated_guest: true,
        ..booking()
    });
    assert_eq!(
        analysis::repeat_guest_rate(&table).unwrap().repeated_guests_percentage,
        33.33
    );
}

#[test]
fn ratio_reports_reject_empty_tables() {
    let empty: Vec<Booking> = Vec::new();
    assert_eq!(
        analysis::repeat_guest_rate(&empty).unwrap_err().kind(),
        ErrorKind::Data
    );
    assert_eq!(analysis::total_stats(&empty).unwrap_err().kind(), ErrorKind::Data);
    assert_eq!(
        analysis::seasonality_analysis(&empty).unwrap_err().kind(),
        ErrorKind::Data
    );
    assert_eq!(
        analysis::most_popular_meal(&empty).unwrap_err().kind(),
        ErrorKind::Data
    );

    let all_cancelled = vec![cancelled(booking()), cancelled(booking())];
    assert_eq!(
        analysis::parking_and_geo(&all_cancelled).unwrap_err().kind(),
        ErrorKind::Data
    );
}

#[test]
fn grouped_reports_return_empty_lists_when_nothing_qualifies() {
    let all_cancelled = vec![cancelled(booking()), cancelled(city_booking())];
    assert!(analysis::avg_stay_by_year_hotel(&all_cancelled).unwrap().is_empty());
    assert!(analysis::revenue_by_month_hotel(&all_cancelled).unwrap().is_empty());
    assert!(analysis::guests_by_year(&all_cancelled).unwrap().is_empty());
    assert!(analysis::avg_rate_resort_by_month(&all_cancelled).unwrap().is_empty());
    assert!(analysis::common_arrival_day_city(&all_cancelled).unwrap().is_empty());
    assert!(analysis::revenue_resort_by_country(&all_cancelled).is_empty());
    assert!(analysis::count_by_hotel_meal(&all_cancelled).is_empty());
    assert!(analysis::count_by_hotel_repeat_guest(&all_cancelled).is_empty());
    assert!(analysis::top_countries(&all_cancelled).is_empty());
}

#[test]
fn avg_stay_excludes_cancelled_and_rounds() {
    let stay = |weekend: u32, week: u32| Booking {
        stays_in_weekend_nights: weekend,
        stays_in_week_nights: week,
        ..booking()
    };
    let table = vec![
        stay(1, 2),
        stay(0, 3),
        stay(2, 2),
        cancelled(stay(4, 10)),
        Booking {
            stays_in_weekend_nights: 2,
            stays_in_week_nights: 5,
            ..city_booking()
        },
    ];

    let rows = analysis::avg_stay_by_year_hotel(&table).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].hotel, CITY_HOTEL);
    assert_eq!(rows[0].avg_length_of_stay, 7.0);
    assert_eq!(rows[1].hotel, RESORT_HOTEL);
    assert_eq!(rows[1].year, 2017);
    assert_eq!(rows[1].avg_length_of_stay, 3.33);
}

#[test]
fn avg_rate_rounds_to_two_decimals() {
    let table = vec![Booking {
        adr: 3.14159,
        ..booking()
    }];
    let rows = analysis::avg_rate_resort_by_month(&table).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].month.name(), "July");
    assert_eq!(rows[0].avg_daily_rate, 3.14);
}

#[test]
fn revenue_by_month_follows_calendar_order() {
    let table = vec![
        arriving(2016, "December", 10, 0),
        Booking {
            hotel: CITY_HOTEL.to_string(),
            ..arriving(2016, "March", 10, 0)
        },
        arriving(2016, "February", 10, 0),
        Booking {
            hotel: CITY_HOTEL.to_string(),
            ..arriving(2017, "January", 10, 0)
        },
        arriving(2016, "October", 10, 0),
        arriving(2017, "February", 12, 0),
    ];

    let rows = analysis::revenue_by_month_hotel(&table).unwrap();
    let months: Vec<u32> = rows.iter().map(|r| r.month.number()).collect();
    assert_eq!(months, vec![1, 2, 3, 10, 12]);
    for hotel in [CITY_HOTEL, RESORT_HOTEL] {
        let per_hotel: Vec<u32> = rows
            .iter()
            .filter(|r| r.hotel == hotel)
            .map(|r| r.month.number())
            .collect();
        assert!(per_hotel.windows(2).all(|w| w[0] < w[1]));
    }
    let february = rows.iter().find(|r| r.month.number() == 2).unwrap();
    assert_eq!(february.total_revenue, 600.0);
}

#[test]
fn seasonality_picks_least_popular_by_count_then_latest_first_seen() {
    let table = vec![
        arriving(2017, "July", 15, 0),
        arriving(2017, "July", 16, 0),
        arriving(2017, "March", 1, 0),
        arriving(2017, "May", 1, 0),
        arriving(2017, "July", 20, 40),
    ];

    let report = analysis::seasonality_analysis(&table).unwrap();
    assert_eq!(report.most_popular_arrival_month.name(), "July");
    assert_eq!(report.least_popular_arrival_month.name(), "May");
    assert_eq!(report.most_popular_booking_month.name(), "July");
    assert_eq!(report.least_popular_booking_month.name(), "June");
}

#[test]
fn family_composition_splits_active_guests() {
    let table = vec![
        Booking {
            adults: 1,
            ..booking()
        },
        booking(),
        Booking {
            adults: 3,
            ..booking()
        },
        Booking {
            children: Some(2),
            ..booking()
        },
        Booking {
            babies: 1,
            children: None,
            ..booking()
        },
        cancelled(booking()),
    ];

    let report = analysis::family_composition(&table);
    assert_eq!(report.guests_without_children, 3);
    assert_eq!(report.guests_with_children_or_babies, 2);
    assert_eq!(report.solo_guests, 1);
    assert_eq!(report.couples_without_children, 1);
}

#[test]
fn parking_share_is_a_percentage_of_active_bookings() {
    let table = vec![
        Booking {
            required_car_parking_spaces: 1,
            ..booking()
        },
        booking(),
        booking(),
        cancelled(Booking {
            required_car_parking_spaces: 2,
            ..booking()
        }),
    ];
    let report = analysis::parking_and_geo(&table).unwrap();
    assert_eq!(report.parking_space_percentage, 33.33);
    assert_eq!(report.top_countries, vec![CountryCount::from(("PRT", 3))]);
}

#[test]
fn meal_popularity_ranks_every_package() {
    let meal = |m: &str| Booking {
        meal: m.to_string(),
        ..booking()
    };
    let table = vec![
        meal("HB"),
        meal("BB"),
        meal("BB"),
        meal("SC"),
        cancelled(meal("SC")),
        cancelled(meal("SC")),
    ];

    let report = analysis::meal_popularity(&table).unwrap();
    assert_eq!(report.most_popular_meal, "SC");
    assert_eq!(
        names(&report.meal_counts, |m| format!("{}={}", m.meal, m.counts)),
        vec!["SC=3", "BB=2", "HB=1"]
    );
    assert_eq!(
        analysis::most_popular_meal(&table).unwrap().most_popular_meal,
        "SC"
    );
}

#[test]
fn total_stats_covers_the_whole_table() {
    let table = vec![
        booking(),
        Booking {
            adr: 50.0,
            stays_in_week_nights: 0,
            market_segment: "Groups".to_string(),
            ..booking()
        },
        cancelled(booking()),
    ];

    let stats = analysis::total_stats(&table).unwrap();
    assert_eq!(stats.total_number_of_bookings, 3);
    assert_eq!(stats.number_of_cancelled_bookings, 1);
    assert_eq!(stats.number_of_non_cancelled_bookings, 2);
    assert_eq!(stats.average_length_of_stay, 2.33);
    assert_eq!(stats.average_daily_rate, 83.33);
    assert_eq!(stats.most_popular_market_segment, "Online TA");
}

#[test]
fn booking_analysis_combines_the_overview_reports() {
    let table = vec![booking(), from_country("USA"), cancelled(from_country("FRA"))];
    let report = analysis::booking_analysis(&table).unwrap();
    assert_eq!(report.seasonality.most_popular_arrival_month.name(), "July");
    assert_eq!(report.families.couples_without_children, 2);
    assert_eq!(report.most_popular_countries.len(), 2);
    assert_eq!(report.meal_packages.len(), 1);
    assert_eq!(report.meal_packages[0].counts, 3);
}

#[test]
fn guests_by_year_treats_missing_children_as_zero() {
    let table = vec![
        Booking {
            children: None,
            babies: 1,
            ..booking()
        },
        Booking {
            children: Some(1),
            ..arriving(2016, "May", 1, 0)
        },
        cancelled(booking()),
    ];
    let rows = analysis::guests_by_year(&table).unwrap();
    assert_eq!(
        names(&rows, |r| format!("{}:{}", r.year, r.count_guests)),
        vec!["2016:3", "2017:3"]
    );
}

#[test]
fn arrival_day_for_city_hotel_is_the_most_common_weekday() {
    let city = |day: u32| Booking {
        arrival_date_day_of_month: day,
        ..city_booking()
    };
    let table = vec![city(15), city(16), city(22), booking(), cancelled(city(16))];
    let rows = analysis::common_arrival_day_city(&table).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].day_of_the_week, "Saturday");
    assert_eq!(rows[0].counts_of_arrivals, 2);
}

#[test]
fn hotel_meal_counts_are_grouped_by_meal_then_hotel() {
    let table = vec![
        Booking {
            meal: "HB".to_string(),
            ..booking()
        },
        city_booking(),
        booking(),
        booking(),
    ];
    let rows = analysis::count_by_hotel_meal(&table);
    assert_eq!(
        names(&rows, |r| format!("{}/{}/{}", r.meal, r.hotel, r.counts)),
        vec!["BB/City Hotel/1", "BB/Resort Hotel/2", "HB/Resort Hotel/1"]
    );
}

#[test]
fn repeat_counts_split_by_hotel_and_flag() {
    let table = vec![
        booking(),
        Booking {
            is_repeated_guest: true,
            ..booking()
        },
        city_booking(),
        city_booking(),
        cancelled(city_booking()),
    ];
    let rows = analysis::count_by_hotel_repeat_guest(&table);
    assert_eq!(
        names(&rows, |r| format!("{}/{}/{}", r.hotel, r.is_repeated_guest, r.count_guests)),
        vec![
            "City Hotel/false/2",
            "Resort Hotel/false/1",
            "Resort Hotel/true/1"
        ]
    );
}

#[test]
fn resort_revenue_by_country_sorts_descending_with_stable_ties() {
    let table = vec![
        from_country("GBR"),
        from_country("PRT"),
        from_country("ESP"),
        from_country("PRT"),
        Booking {
            country: Some("FRA".to_string()),
            ..city_booking()
        },
        cancelled(from_country("ESP")),
    ];
    let rows = analysis::revenue_resort_by_country(&table);
    assert_eq!(
        names(&rows, |r| format!("{}={}", r.country, r.total_revenue)),
        vec!["PRT=600", "GBR=300", "ESP=300"]
    );
}

#[test]
fn country_lookup_normalizes_and_limits() {
    let mut table: Vec<Booking> = (0..7).map(|_| from_country("PRT")).collect();
    table.push(from_country("USA"));

    let found = analysis::country_lookup(&table, "prt").unwrap();
    assert_eq!(found.len(), 5);

    assert_eq!(
        analysis::country_lookup(&table, "NLD").unwrap_err().kind(),
        ErrorKind::NotFound
    );
    assert_eq!(
        analysis::country_lookup(&table, "P1").unwrap_err().kind(),
        ErrorKind::BadRequest
    );
    assert_eq!(
        analysis::normalize_country_code("PORT").unwrap_err().kind(),
        ErrorKind::BadRequest
    );
}

#[test]
fn revenue_totals_keep_full_precision() {
    let table = vec![Booking {
        stays_in_weekend_nights: 0,
        stays_in_week_nights: 1,
        adr: 100.005,
        ..booking()
    }];

    let monthly = analysis::revenue_by_month_hotel(&table).unwrap();
    assert_eq!(monthly.len(), 1);
    assert_eq!(monthly[0].total_revenue, 100.005);

    let by_country = analysis::revenue_resort_by_country(&table);
    assert_eq!(by_country.len(), 1);
    assert_eq!(by_country[0].total_revenue, 100.005);
}
