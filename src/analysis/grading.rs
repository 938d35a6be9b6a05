use crate::analysis::types::{Grade, Status};

/// Letter grade for a 0..=100 score.
pub fn grade(score: u8) -> Grade {
    match score {
        90.. => Grade::A,
        80..=89 => Grade::B,
        70..=79 => Grade::C,
        60..=69 => Grade::D,
        _ => Grade::F,
    }
}

pub fn status(score: u8) -> Status {
    match score {
        80.. => Status::Excellent,
        60..=79 => Status::Good,
        _ => Status::Poor,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grade_boundaries() {
        let cases = [
            (100, Grade::A),
            (90, Grade::A),
            (89, Grade::B),
            (80, Grade::B),
            (79, Grade::C),
            (70, Grade::C),
            (69, Grade::D),
            (60, Grade::D),
            (59, Grade::F),
            (0, Grade::F),
        ];
        for (score, expected) in cases {
            assert_eq!(grade(score), expected, "grade({score})");
        }
    }

    #[test]
    fn status_boundaries() {
        let cases = [
            (100, Status::Excellent),
            (80, Status::Excellent),
            (79, Status::Good),
            (60, Status::Good),
            (59, Status::Poor),
            (0, Status::Poor),
        ];
        for (score, expected) in cases {
            assert_eq!(status(score), expected, "status({score})");
        }
    }

    #[test]
    fn grade_and_status_are_monotonic() {
        for score in 1..=100u8 {
            assert!(grade(score - 1) as u8 >= grade(score) as u8);
            assert!(status(score - 1) as u8 >= status(score) as u8);
        }
    }
}
