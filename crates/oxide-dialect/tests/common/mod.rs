#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use oxide_dialect::{DialectError, ExecResult, Result, Row, SqlConnection, SqlValue};

/// What the mock answers for queries containing a given fragment.
#[derive(Debug, Clone)]
enum Reply {
    Row(Vec<SqlValue>),
    Fail(String),
}

/// A scripted connection that records every statement it receives.
///
/// Replies are matched by substring, first match wins. Unmatched queries
/// return `NoRows`; unmatched statements succeed.
#[derive(Debug, Default)]
pub struct MockConnection {
    replies: Mutex<Vec<(String, Reply)>>,
    log: Mutex<Vec<(String, Vec<SqlValue>)>>,
}

impl MockConnection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(self, fragment: &str, values: Vec<SqlValue>) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push((fragment.to_string(), Reply::Row(values)));
        self
    }

    pub fn fail_on(self, fragment: &str, message: &str) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push((fragment.to_string(), Reply::Fail(message.to_string())));
        self
    }

    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// Every statement received, in order.
    pub fn statements(&self) -> Vec<(String, Vec<SqlValue>)> {
        self.log.lock().unwrap().clone()
    }

    fn reply_for(&self, query: &str, args: &[SqlValue]) -> Option<Reply> {
        self.log
            .lock()
            .unwrap()
            .push((query.to_string(), args.to_vec()));
        self.replies
            .lock()
            .unwrap()
            .iter()
            .find(|(fragment, _)| query.contains(fragment.as_str()))
            .map(|(_, reply)| reply.clone())
    }
}

impl SqlConnection for MockConnection {
    fn query_row(&self, query: &str, args: &[SqlValue]) -> Result<Row> {
        match self.reply_for(query, args) {
            Some(Reply::Row(values)) => Ok(Row::new(values)),
            Some(Reply::Fail(message)) => Err(DialectError::Execution(message)),
            None => Err(DialectError::NoRows),
        }
    }

    fn exec(&self, query: &str, args: &[SqlValue]) -> Result<ExecResult> {
        match self.reply_for(query, args) {
            Some(Reply::Fail(message)) => Err(DialectError::Execution(message)),
            _ => Ok(ExecResult { rows_affected: 0 }),
        }
    }
}

pub fn text(value: &str) -> SqlValue {
    SqlValue::Text(value.to_string())
}

pub fn count(n: i64) -> Vec<SqlValue> {
    vec![SqlValue::Int(n)]
}
