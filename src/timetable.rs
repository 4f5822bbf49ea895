/// Marks the header of a direction section ("kierunek" = direction).
pub const DIRECTION_MARKER: &str = "kierunek";
/// Marks a departure row ("o" = odjazd).
pub const DEPARTURE_MARKER: char = 'o';
/// Marks an arrival row ("p" = przyjazd).
pub const ARRIVAL_MARKER: char = 'p';

/// Builds the timetable block for one station out of the lines of a rendered PDF.
///
/// The first two lines (line identifier and validity period) are always emitted.
/// After that every direction header is emitted, unless it already names the station,
/// followed by the rows mentioning the station. An arrival row pulls in the line right
/// after it when that line is a departure row, and swallows it when it is the header of
/// the next direction section.
///
/// The markers are single-character substring checks, so any unrelated row containing a
/// lowercase `o` or `p` next to the station name gets classified as well.
pub fn extract_timetable<S: AsRef<str>>(station: &str, lines: &[S]) -> String {
    let station = station.to_uppercase();
    let mut timetable = String::new();

    for header in lines.iter().take(2) {
        push_line(&mut timetable, header.as_ref());
    }

    let mut index = 2;
    while index < lines.len() {
        let line = lines[index].as_ref();

        if is_direction_header(line) && !line.contains(&station) {
            push_line(&mut timetable, line);
        }

        if line.contains(&station) {
            if line.contains(DEPARTURE_MARKER) {
                push_line(&mut timetable, line);
            } else if line.contains(ARRIVAL_MARKER) {
                push_line(&mut timetable, line);
                // Without a following line the arrival stays unpaired
                if let Some(next) = lines.get(index + 1).map(|next| next.as_ref()) {
                    if is_direction_header(next) {
                        index += 1;
                    } else if next.contains(DEPARTURE_MARKER) {
                        push_line(&mut timetable, next);
                        index += 1;
                    }
                }
            }
        }

        index += 1;
    }

    timetable
}

fn is_direction_header(line: &str) -> bool {
    line.contains(DIRECTION_MARKER)
}

fn push_line(timetable: &mut String, line: &str) {
    timetable.push_str(line);
    timetable.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: [&str; 2] = ["ROZKŁAD JAZDY S3", "ważny w dniu 01.06.2024"];

    fn with_header(rows: &[&'static str]) -> Vec<&'static str> {
        HEADER.iter().chain(rows.iter()).copied().collect()
    }

    #[test]
    fn test_departure_row_under_direction() {
        let lines = with_header(&["kierunek WARSZAWA", "STATION D o"]);
        assert_eq!(
            extract_timetable("station d", &lines),
            "ROZKŁAD JAZDY S3\nważny w dniu 01.06.2024\nkierunek WARSZAWA\nSTATION D o\n"
        );
    }

    #[test]
    fn test_header_is_emitted_for_unknown_station() {
        let lines = with_header(&["OTHER STATION o 10:15"]);
        assert_eq!(
            extract_timetable("nowhere", &lines),
            "ROZKŁAD JAZDY S3\nważny w dniu 01.06.2024\n"
        );
    }

    #[test]
    fn test_short_input() {
        assert_eq!(extract_timetable("x", &["ONLY LINE"]), "ONLY LINE\n");
        assert_eq!(extract_timetable::<&str>("x", &[]), "");
    }

    #[test]
    fn test_arrival_paired_with_departure() {
        let lines = with_header(&[
            "kierunek RADOM",
            "PIASECZNO p 10:02 11:02",
            "o 10:04 11:04",
            "GÓRA KALWARIA o 10:20 11:20",
        ]);
        assert_eq!(
            extract_timetable("Piaseczno", &lines),
            "ROZKŁAD JAZDY S3\nważny w dniu 01.06.2024\nkierunek RADOM\n\
             PIASECZNO p 10:02 11:02\no 10:04 11:04\n"
        );
    }

    #[test]
    fn test_paired_departure_is_not_emitted_twice() {
        let lines = with_header(&["PIASECZNO p 10:02", "PIASECZNO o 10:04"]);
        assert_eq!(
            extract_timetable("piaseczno", &lines),
            "ROZKŁAD JAZDY S3\nważny w dniu 01.06.2024\nPIASECZNO p 10:02\nPIASECZNO o 10:04\n"
        );
    }

    #[test]
    fn test_arrival_as_last_line() {
        let lines = with_header(&["kierunek RADOM", "RADOM p 11:30"]);
        assert_eq!(
            extract_timetable("radom", &lines),
            "ROZKŁAD JAZDY S3\nważny w dniu 01.06.2024\nRADOM p 11:30\n"
        );
    }

    #[test]
    fn test_arrival_swallows_next_direction_header() {
        let lines = with_header(&[
            "kierunek OTWOCK",
            "OTWOCK p 09:40",
            "kierunek LEGIONOWO",
            "LEGIONOWO o 10:00",
        ]);
        assert_eq!(
            extract_timetable("otwock", &lines),
            "ROZKŁAD JAZDY S3\nważny w dniu 01.06.2024\nOTWOCK p 09:40\n"
        );
    }

    #[test]
    fn test_arrival_followed_by_unrelated_row() {
        let lines = with_header(&["WOLA p 08:00", "12:00 13:00", "WOLA o 08:05"]);
        assert_eq!(
            extract_timetable("wola", &lines),
            "ROZKŁAD JAZDY S3\nważny w dniu 01.06.2024\nWOLA p 08:00\nWOLA o 08:05\n"
        );
    }

    #[test]
    fn test_direction_naming_station_is_suppressed() {
        let lines = with_header(&["kierunek OTWOCK", "WAWER o 07:12", "kierunek WAWER"]);
        assert_eq!(
            extract_timetable("wawer", &lines),
            "ROZKŁAD JAZDY S3\nważny w dniu 01.06.2024\nkierunek OTWOCK\nWAWER o 07:12\n"
        );
    }

    #[test]
    fn test_station_row_without_markers_is_dropped() {
        let lines = with_header(&["kierunek RADOM", "WAWER 07:12 08:12"]);
        assert_eq!(
            extract_timetable("wawer", &lines),
            "ROZKŁAD JAZDY S3\nważny w dniu 01.06.2024\nkierunek RADOM\n"
        );
    }
}
