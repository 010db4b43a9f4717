use crate::models::{Film, Seance};

/// "HH:MM" -> минуты от полуночи. None для некорректного времени.
pub fn time_to_minutes(time: &str) -> Option<u32> {
    let (h, m) = time.split_once(':')?;
    let h: u32 = h.parse().ok()?;
    let m: u32 = m.parse().ok()?;
    if h > 23 || m > 59 {
        return None;
    }
    Some(h * 60 + m)
}

/// Строгое пересечение минутных интервалов [a_start, a_end) и [b_start, b_end).
pub fn intervals_overlap(a_start: u32, a_end: u32, b_start: u32, b_end: u32) -> bool {
    a_start < b_end && a_end > b_start
}

// Длительности ограничены валидацией, но интервальная арифметика
// не должна паниковать и на предельных значениях.
fn interval_end(start: u32, duration: u32) -> u32 {
    start.saturating_add(duration)
}

fn film_duration(films: &[Film], film_id: i64) -> u32 {
    films
        .iter()
        .find(|f| f.id == film_id)
        .map(|f| f.film_duration)
        .unwrap_or(0)
}

/// Ищет сеанс того же зала, чей интервал пересекается с кандидатом
/// [start, start + duration). Линейный проход по списку сеансов.
pub fn find_conflict<'a>(
    seances: &'a [Seance],
    films: &[Film],
    hall_id: i64,
    start: u32,
    duration: u32,
) -> Option<&'a Seance> {
    let end = interval_end(start, duration);
    seances.iter().find(|s| {
        if s.seance_hallid != hall_id {
            return false;
        }
        let Some(other_start) = time_to_minutes(&s.seance_time) else {
            return false;
        };
        let other_end = interval_end(other_start, film_duration(films, s.seance_filmid));
        intervals_overlap(start, end, other_start, other_end)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn film(id: i64, duration: u32) -> Film {
        Film {
            id,
            film_name: format!("Фильм {id}"),
            film_duration: duration,
            film_origin: "Россия".to_string(),
            film_poster: String::new(),
            film_description: String::new(),
        }
    }

    fn seance(id: i64, hall_id: i64, film_id: i64, time: &str) -> Seance {
        Seance {
            id,
            seance_filmid: film_id,
            seance_hallid: hall_id,
            seance_time: time.to_string(),
        }
    }

    #[test]
    fn parses_valid_times_and_rejects_garbage() {
        assert_eq!(time_to_minutes("00:00"), Some(0));
        assert_eq!(time_to_minutes("10:10"), Some(610));
        assert_eq!(time_to_minutes("23:59"), Some(1439));
        assert_eq!(time_to_minutes("24:00"), None);
        assert_eq!(time_to_minutes("10:60"), None);
        assert_eq!(time_to_minutes("1010"), None);
        assert_eq!(time_to_minutes("ab:cd"), None);
    }

    #[test]
    fn overlapping_seance_in_same_hall_is_found() {
        let films = vec![film(1, 120)];
        let seances = vec![seance(10, 1, 1, "10:00")]; // занят 10:00-12:00

        // пересечение с хвостом
        assert!(find_conflict(&seances, &films, 1, 690, 90).is_some()); // 11:30
        // пересечение с началом
        assert!(find_conflict(&seances, &films, 1, 540, 90).is_some()); // 09:00-10:30
        // кандидат целиком внутри
        assert!(find_conflict(&seances, &films, 1, 630, 30).is_some());
    }

    #[test]
    fn adjacent_intervals_do_not_conflict() {
        let films = vec![film(1, 120)];
        let seances = vec![seance(10, 1, 1, "10:00")];

        // заканчивается ровно к началу существующего
        assert!(find_conflict(&seances, &films, 1, 480, 120).is_none()); // 08:00-10:00
        // начинается ровно после конца существующего
        assert!(find_conflict(&seances, &films, 1, 720, 90).is_none()); // 12:00
    }

    #[test]
    fn other_hall_never_conflicts() {
        let films = vec![film(1, 120)];
        let seances = vec![seance(10, 1, 1, "10:00")];
        assert!(find_conflict(&seances, &films, 2, 600, 120).is_none());
    }

    #[test]
    fn seance_of_unknown_film_counts_as_zero_length() {
        let films = vec![];
        let seances = vec![seance(10, 1, 99, "10:00")];
        // интервал нулевой длины внутри кандидата всё же конфликтует
        assert!(find_conflict(&seances, &films, 1, 570, 120).is_some());
        // но не на своей границе
        assert!(find_conflict(&seances, &films, 1, 600, 0).is_none());
    }

    #[test]
    fn extreme_durations_do_not_panic() {
        // пустое расписание: конфликта нет при любой длительности
        assert!(find_conflict(&[], &[], 1, 1, u32::MAX).is_none());

        // сеанс фильма предельной длительности перекрывает любой
        // более поздний слот того же зала
        let films = vec![film(1, u32::MAX)];
        let seances = vec![seance(10, 1, 1, "00:01")];
        assert!(find_conflict(&seances, &films, 1, 1200, 90).is_some());
        assert!(find_conflict(&seances, &films, 1, 1200, u32::MAX).is_some());
    }

    proptest! {
        #[test]
        fn overlap_is_symmetric(a in 0u32..1440, da in 0u32..300, b in 0u32..1440, db in 0u32..300) {
            prop_assert_eq!(
                intervals_overlap(a, a + da, b, b + db),
                intervals_overlap(b, b + db, a, a + da)
            );
        }

        #[test]
        fn disjoint_intervals_never_overlap(a in 0u32..1440, da in 0u32..300, gap in 0u32..300, db in 0u32..300) {
            let b = a + da + gap;
            prop_assert!(!intervals_overlap(a, a + da, b, b + db));
        }

        #[test]
        fn identical_nonempty_intervals_overlap(a in 0u32..1440, da in 1u32..300) {
            prop_assert!(intervals_overlap(a, a + da, a, a + da));
        }
    }
}
