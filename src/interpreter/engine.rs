// Line-oriented executor for pseudocode programs

use crate::interpreter::config::TraceConfig;
use crate::interpreter::errors::Halt;
use crate::interpreter::expressions::Evaluator;
use crate::memory::{store::VariableStore, value::Value};
use crate::parser::ast::{Expr, Line, Program};
use crate::snapshot::{ArrayAccess, OutputLog, Snapshot, Termination, Trace, TraceRecorder};
use rustc_hash::FxHashSet;

/// Executes a [`Program`] one line at a time and records a [`Trace`]
pub struct Interpreter<'p> {
    /// Program being executed
    pub(crate) program: &'p Program,

    /// Index of the next line to execute
    pub(crate) pc: usize,

    /// Variable bindings for this run
    pub(crate) store: VariableStore,

    /// Accumulated `PRINT` output
    pub(crate) output: OutputLog,

    /// `ELSEIF`/`ELSE` lines reached by a jump from a false condition.
    /// Reaching one of these lines any other way skips to the chain's `ENDIF`.
    pub(crate) jump_targets: FxHashSet<usize>,

    /// Indexed reads and writes performed since the last snapshot
    pub(crate) pending_accesses: Vec<ArrayAccess>,

    /// Lines visited so far
    pub(crate) steps: usize,

    step_limit: usize,

    recorder: TraceRecorder,
}

impl<'p> Interpreter<'p> {
    pub fn new(program: &'p Program, config: &TraceConfig) -> Self {
        Interpreter {
            program,
            pc: 0,
            store: VariableStore::new(),
            output: OutputLog::new(),
            jump_targets: FxHashSet::default(),
            pending_accesses: Vec::new(),
            steps: 0,
            step_limit: config.step_limit,
            recorder: TraceRecorder::new(config.snapshot_memory_limit),
        }
    }

    /// Run the program from the first line and return the recorded trace.
    ///
    /// Hitting the step limit or the snapshot budget ends the run early; the
    /// trace keeps everything recorded up to that point and says why it stopped.
    pub fn run(mut self) -> Trace {
        tracing::debug!(
            lines = self.program.len(),
            step_limit = self.step_limit,
            "starting trace"
        );

        let termination = match self.execute() {
            Ok(()) => Termination::Completed,
            Err(Halt::StepLimitReached { steps }) => {
                tracing::warn!(steps, "step limit reached, trace truncated");
                Termination::StepLimit { steps }
            }
            Err(Halt::SnapshotLimitExceeded { current, limit }) => {
                tracing::warn!(current, limit, "snapshot memory budget exhausted, trace truncated");
                Termination::SnapshotLimit { limit }
            }
        };

        tracing::debug!(
            snapshots = self.recorder.len(),
            memory = self.recorder.memory_usage(),
            steps = self.steps,
            "trace finished"
        );
        self.recorder.finish(termination)
    }

    fn execute(&mut self) -> Result<(), Halt> {
        self.recorder.push(Snapshot::initial())?;

        while self.pc < self.program.len() {
            if self.steps >= self.step_limit {
                return Err(Halt::StepLimitReached { steps: self.steps });
            }
            self.steps += 1;
            self.execute_line()?;
        }

        Ok(())
    }

    /// Execute the line at `pc` and move `pc` to the next line to run
    fn execute_line(&mut self) -> Result<(), Halt> {
        let program = self.program;
        let Some(line) = program.line(self.pc) else {
            self.pc = program.len();
            return Ok(());
        };

        match line {
            Line::Blank | Line::EndIf => self.pc += 1,
            Line::Unrecognized => {
                tracing::debug!(
                    line = self.pc,
                    text = ?program.source_line(self.pc),
                    "skipping unrecognized line"
                );
                self.pc += 1;
            }
            Line::While(condition) => self.execute_while(condition.as_ref())?,
            Line::EndWhile => self.execute_endwhile(),
            Line::If(condition) => self.execute_if(condition.as_ref())?,
            Line::ElseIf(condition) => self.execute_elseif(condition.as_ref())?,
            Line::Else => self.execute_else()?,
            Line::Print(expr) => self.execute_print(expr)?,
            Line::Assign { target, value } => self.execute_assignment(target, value)?,
        }

        Ok(())
    }

    /// Evaluate an expression against the current bindings, keeping its
    /// indexed reads for the next snapshot
    pub(crate) fn evaluate(&mut self, expr: &Expr) -> Value {
        let mut evaluator = Evaluator::new(&self.store);
        let value = evaluator.evaluate(expr);
        self.pending_accesses.extend(evaluator.into_accesses());
        value
    }

    /// A missing or unparseable condition is false
    pub(crate) fn evaluate_condition(&mut self, condition: Option<&Expr>) -> bool {
        condition.is_some_and(|expr| self.evaluate(expr).is_truthy())
    }

    /// Record the state after executing `line`
    pub(crate) fn take_snapshot(&mut self, line: usize) -> Result<(), Halt> {
        let snapshot = Snapshot {
            line: Some(line),
            variables: self.store.clone(),
            output: self.output.clone(),
            accesses: std::mem::take(&mut self.pending_accesses),
        };

        tracing::trace!(line, index = self.recorder.len(), "snapshot");
        self.recorder.push(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::value::Value;

    fn run(source: &str) -> Trace {
        let program = Program::parse(source);
        Interpreter::new(&program, &TraceConfig::default()).run()
    }

    fn lines_of(trace: &Trace) -> Vec<Option<usize>> {
        trace.iter().map(|s| s.line).collect()
    }

    #[test]
    fn test_initial_snapshot() {
        let trace = run("x = 1");
        assert_eq!(trace.len(), 2);
        assert!(trace.get(0).unwrap().is_initial());
        assert!(trace.get(0).unwrap().variables.is_empty());
        assert_eq!(trace.get(1).unwrap().variable("x"), Some(&Value::Number(1.0)));
        assert!(trace.termination().is_complete());
    }

    #[test]
    fn test_empty_program() {
        let trace = run("");
        assert_eq!(trace.len(), 1);
        assert!(trace.termination().is_complete());
    }

    #[test]
    fn test_structural_lines_not_recorded() {
        let trace = run("\nIF true THEN\n  x = 1\nENDIF\n");
        assert_eq!(lines_of(&trace), vec![None, Some(1), Some(2)]);
    }

    #[test]
    fn test_while_guard_evaluated_n_plus_one_times() {
        let trace = run("i = 0\nWHILE i < 3\n  i = i + 1\nENDWHILE\nPRINT i");
        assert_eq!(trace.snapshots_for_line(1).count(), 4);
        assert_eq!(trace.snapshots_for_line(2).count(), 3);
        assert_eq!(trace.final_output(), vec!["3".to_string()]);
    }

    #[test]
    fn test_false_while_skips_body() {
        let trace = run("WHILE false\n  x = 1\nENDWHILE\nPRINT \"done\"");
        assert_eq!(lines_of(&trace), vec![None, Some(0), Some(3)]);
    }

    #[test]
    fn test_if_chain_mutual_exclusion() {
        let source = "\
x = 5
IF x > 10 THEN
  PRINT \"big\"
ELSEIF x > 3 THEN
  PRINT \"medium\"
ELSEIF x > 1 THEN
  PRINT \"small\"
ELSE
  PRINT \"tiny\"
ENDIF";
        let trace = run(source);
        assert_eq!(trace.final_output(), vec!["medium".to_string()]);
        assert_eq!(lines_of(&trace), vec![None, Some(0), Some(1), Some(3), Some(4)]);
    }

    #[test]
    fn test_else_taken() {
        let trace = run("IF 0 THEN\n  PRINT 1\nELSE\n  PRINT 2\nENDIF");
        assert_eq!(trace.final_output(), vec!["2".to_string()]);
        assert_eq!(lines_of(&trace), vec![None, Some(0), Some(2), Some(3)]);
    }

    #[test]
    fn test_nested_if_inside_chain() {
        let source = "\
a = 1
IF a == 1 THEN
  IF a == 2 THEN
    PRINT \"inner\"
  ELSE
    PRINT \"inner else\"
  ENDIF
ELSE
  PRINT \"outer else\"
ENDIF";
        let trace = run(source);
        assert_eq!(trace.final_output(), vec!["inner else".to_string()]);
    }

    #[test]
    fn test_output_remembers_print_line() {
        let trace = run("x = 2\n\nPRINT x\nPRINT \"done\"");
        let output = &trace.last().unwrap().output;
        let origins: Vec<usize> = output.lines.iter().map(|l| l.line).collect();
        assert_eq!(origins, vec![2, 3]);
        assert_eq!(trace.get(0), Some(&Snapshot::initial()));
    }

    #[test]
    fn test_nested_if_without_else_inside_chain() {
        let source = "\
a = 1
b = 0
IF a == 1 THEN
  IF b == 1 THEN
    PRINT \"inner\"
  ENDIF
ELSE
  PRINT \"outer else\"
ENDIF
PRINT \"end\"";
        let trace = run(source);
        assert_eq!(trace.final_output(), vec!["end".to_string()]);
        assert_eq!(
            lines_of(&trace),
            vec![None, Some(0), Some(1), Some(2), Some(3), Some(9)]
        );
        assert_eq!(trace.snapshots_for_line(6).count(), 0);
        assert_eq!(trace.snapshots_for_line(7).count(), 0);
    }

    #[test]
    fn test_deeply_nested_expression_line_skipped() {
        let depth = 10_000;
        let source = format!("PRINT {}1{}", "(".repeat(depth), ")".repeat(depth));
        let trace = run(&source);
        assert_eq!(lines_of(&trace), vec![None]);
        assert!(trace.final_output().is_empty());
        assert_eq!(trace.termination(), Termination::Completed);
    }

    #[test]
    fn test_deeply_nested_condition_is_false() {
        let depth = 10_000;
        let source = format!(
            "IF {}1{} THEN\n  PRINT \"yes\"\nELSE\n  PRINT \"no\"\nENDIF",
            "(".repeat(depth),
            ")".repeat(depth)
        );
        let trace = run(&source);
        assert_eq!(trace.final_output(), vec!["no".to_string()]);
    }

    #[test]
    fn test_if_inside_while_re_arms_each_iteration() {
        let source = "\
i = 0
WHILE i < 4
  IF i % 2 == 0 THEN
    PRINT \"even\"
  ELSE
    PRINT \"odd\"
  ENDIF
  i = i + 1
ENDWHILE";
        let trace = run(source);
        assert_eq!(trace.final_output(), vec!["even", "odd", "even", "odd"]);
    }

    #[test]
    fn test_snapshot_isolation() {
        let trace = run("xs = [1, 2]\nxs[0] = 9\nxs[2] = 3");
        let first = trace.get(1).unwrap();
        assert_eq!(
            first.variable("xs"),
            Some(&Value::Array(vec![Value::Number(1.0), Value::Number(2.0)]))
        );
        let last = trace.last().unwrap();
        assert_eq!(
            last.variable("xs"),
            Some(&Value::Array(vec![Value::Number(9.0), Value::Number(2.0), Value::Number(3.0)]))
        );
    }

    #[test]
    fn test_index_write_out_of_range_is_noop() {
        let trace = run("xs = [1]\nxs[5] = 2\nn = 3\nn[0] = 1");
        let last = trace.last().unwrap();
        assert_eq!(last.variable("xs"), Some(&Value::Array(vec![Value::Number(1.0)])));
        assert_eq!(last.variable("n"), Some(&Value::Number(3.0)));
        assert!(last.accesses.is_empty());
        assert_eq!(trace.len(), 5);
    }

    #[test]
    fn test_accesses_attached_to_line() {
        let trace = run("xs = [4, 5]\ny = xs[1]\nxs[0] = y");
        assert_eq!(trace.get(2).unwrap().accesses.len(), 1);
        assert_eq!(trace.get(2).unwrap().accesses[0].to_string(), "xs[1] -> 5");
        assert_eq!(trace.get(3).unwrap().accesses[0].to_string(), "xs[0] <- 5");
    }

    #[test]
    fn test_step_limit_truncates() {
        let program = Program::parse("WHILE true\n  x = 1\nENDWHILE");
        let config = TraceConfig::default().with_step_limit(10);
        let trace = Interpreter::new(&program, &config).run();

        assert_eq!(trace.termination(), Termination::StepLimit { steps: 10 });
        // WHILE, body, ENDWHILE per iteration; ENDWHILE records nothing
        assert_eq!(trace.len(), 1 + 7);
    }

    #[test]
    fn test_unmatched_blocks_run_to_end() {
        let trace = run("IF false THEN\n  PRINT 1\nPRINT 2");
        assert!(trace.final_output().is_empty());
        assert!(trace.termination().is_complete());

        let trace = run("PRINT 1\nENDWHILE\nENDIF\nPRINT 2");
        assert_eq!(trace.final_output(), vec!["1", "2"]);
    }

    #[test]
    fn test_stray_else_skipped() {
        let trace = run("x = 1\nELSE\n  x = 2\nENDIF\nPRINT x");
        assert_eq!(trace.final_output(), vec!["1".to_string()]);
    }

    #[test]
    fn test_unparseable_condition_is_false() {
        let trace = run("IF ) THEN\n  PRINT 1\nELSE\n  PRINT 2\nENDIF");
        assert_eq!(trace.final_output(), vec!["2".to_string()]);
    }
}
