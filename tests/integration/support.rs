use termfolio::shell::Interpreter;
use termfolio::store::TreeSlot;
use termfolio::tree::FileTree;
use termfolio::views::{MemorySink, ResponseBody};

/// `/Home` holds folder `Docs` (with file `resume`) and plain file `readme`.
pub const SAMPLE_DOCUMENT: &str = r#"{
  "name": "Home",
  "type": "folder",
  "path": "/Home",
  "childrenNames": ["Docs", "readme"],
  "children": {
    "Docs": {
      "name": "Docs",
      "type": "folder",
      "path": "/Home/Docs",
      "childrenNames": ["resume"],
      "children": {
        "resume": {
          "name": "resume",
          "type": "file",
          "path": "/Home/Docs/resume",
          "data": "Hello",
          "executable": false
        }
      }
    },
    "readme": {
      "name": "readme",
      "type": "file",
      "path": "/Home/readme",
      "data": "",
      "executable": false
    }
  }
}"#;

pub fn sample_tree() -> FileTree {
    FileTree::from_json(SAMPLE_DOCUMENT).unwrap()
}

pub fn sample_session() -> Interpreter<MemorySink> {
    Interpreter::new(TreeSlot::ready(sample_tree()), MemorySink::new())
}

pub fn last_body(interpreter: &Interpreter<MemorySink>) -> ResponseBody {
    interpreter
        .sink()
        .last()
        .map(|entry| entry.body.clone())
        .unwrap_or(ResponseBody::Blank)
}
