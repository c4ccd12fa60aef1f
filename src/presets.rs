//! Built-in teaching programs
//!
//! Each preset is a complete pseudocode program that runs to completion well
//! inside the default step limit.

/// A named example program
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preset {
    pub name: &'static str,
    pub description: &'static str,
    pub source: &'static str,
}

pub const LINEAR_SEARCH: Preset = Preset {
    name: "Linear Search",
    description: "Scan a list until the target value is found",
    source: r#"items = [5, 3, 8, 1, 9]
target = 8
found = false
i = 0
WHILE i < 5 AND found == false
  IF items[i] == target THEN
    found = true
  ENDIF
  i = i + 1
ENDWHILE
PRINT found"#,
};

pub const COUNTDOWN: Preset = Preset {
    name: "Countdown",
    description: "Count down from 5 and launch",
    source: r#"n = 5
WHILE n > 0
  PRINT n
  n = n - 1
ENDWHILE
PRINT "Go!""#,
};

pub const BUBBLE_SORT: Preset = Preset {
    name: "Bubble Sort",
    description: "Sort a list by swapping adjacent elements",
    source: r#"items = [5, 1, 4, 2, 8]
n = 5
i = 0
WHILE i < n - 1
  j = 0
  WHILE j < n - 1 - i
    IF items[j] > items[j + 1] THEN
      temp = items[j]
      items[j] = items[j + 1]
      items[j + 1] = temp
    ENDIF
    j = j + 1
  ENDWHILE
  i = i + 1
ENDWHILE
PRINT items"#,
};

pub const SUM_OF_ARRAY: Preset = Preset {
    name: "Sum of Array",
    description: "Add up every element of a list",
    source: r#"numbers = [4, 8, 15, 16, 23, 42]
total = 0
i = 0
WHILE i < 6
  total = total + numbers[i]
  i = i + 1
ENDWHILE
PRINT "Total: " + total"#,
};

pub const FIZZBUZZ: Preset = Preset {
    name: "FizzBuzz",
    description: "Multiples of 3 and 5 from 1 to 15",
    source: r#"i = 1
WHILE i <= 15
  IF i % 15 == 0 THEN
    PRINT "FizzBuzz"
  ELSEIF i % 3 == 0 THEN
    PRINT "Fizz"
  ELSEIF i % 5 == 0 THEN
    PRINT "Buzz"
  ELSE
    PRINT i
  ENDIF
  i = i + 1
ENDWHILE"#,
};

pub const GRADE_CLASSIFIER: Preset = Preset {
    name: "Grade Classifier",
    description: "Map scores to letter grades with an ELSEIF chain",
    source: r#"scores = [95, 82, 67, 45]
i = 0
WHILE i < 4
  score = scores[i]
  IF score >= 90 THEN
    grade = "A"
  ELSEIF score >= 80 THEN
    grade = "B"
  ELSEIF score >= 60 THEN
    grade = "C"
  ELSE
    grade = "F"
  ENDIF
  PRINT score + ": " + grade
  i = i + 1
ENDWHILE"#,
};

pub const PRESETS: &[Preset] = &[
    LINEAR_SEARCH,
    COUNTDOWN,
    BUBBLE_SORT,
    SUM_OF_ARRAY,
    FIZZBUZZ,
    GRADE_CLASSIFIER,
];

pub fn all() -> &'static [Preset] {
    PRESETS
}

/// Look up a preset by name, ignoring case and treating `-`/`_` as spaces
/// (`bubble-sort` finds "Bubble Sort").
pub fn find(name: &str) -> Option<&'static Preset> {
    let wanted = normalize(name);
    PRESETS.iter().find(|preset| normalize(preset.name) == wanted)
}

fn normalize(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| match c {
            '-' | '_' => ' ',
            c => c.to_ascii_lowercase(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::trace_source;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_find() {
        assert_eq!(find("Countdown"), Some(&COUNTDOWN));
        assert_eq!(find("bubble-sort"), Some(&BUBBLE_SORT));
        assert_eq!(find("SUM_OF_ARRAY"), Some(&SUM_OF_ARRAY));
        assert_eq!(find("quicksort"), None);
    }

    #[test]
    fn test_every_preset_completes() {
        for preset in all() {
            let trace = trace_source(preset.source);
            assert!(trace.termination().is_complete(), "{} did not complete", preset.name);
            assert!(!trace.final_output().is_empty(), "{} printed nothing", preset.name);
        }
    }

    #[test]
    fn test_preset_outputs() {
        assert_eq!(trace_source(BUBBLE_SORT.source).final_output(), vec!["[1, 2, 4, 5, 8]"]);
        assert_eq!(trace_source(SUM_OF_ARRAY.source).final_output(), vec!["Total: 108"]);
        assert_eq!(
            trace_source(GRADE_CLASSIFIER.source).final_output(),
            vec!["95: A", "82: B", "67: C", "45: F"]
        );

        let fizzbuzz = trace_source(FIZZBUZZ.source).final_output();
        assert_eq!(fizzbuzz.len(), 15);
        assert_eq!(fizzbuzz[2], "Fizz");
        assert_eq!(fizzbuzz[4], "Buzz");
        assert_eq!(fizzbuzz[14], "FizzBuzz");
        assert_eq!(fizzbuzz[6], "7");
    }
}
