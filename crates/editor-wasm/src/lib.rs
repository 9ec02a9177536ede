use wasm_bindgen::prelude::*;

use scene_editor_lib::command::{execute_json, execute_json_batch};
use scene_editor_lib::shortcuts::Modifiers;
use scene_editor_lib::state::EditorSettings;
use scene_editor_lib::EditorHarness;

fn log_error(msg: &str) {
    web_sys::console::error_1(&JsValue::from_str(msg));
}

/// Редактор сцены для браузера: принимает JSON-команды, возвращает JSON-ответы
#[wasm_bindgen]
pub struct WasmEditor {
    harness: EditorHarness,
}

#[wasm_bindgen]
impl WasmEditor {
    /// Создаёт редактор с новой сценой (камера и свет по умолчанию)
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmEditor {
        let mut harness = EditorHarness::with_settings(EditorSettings::default());
        harness.new_scene(None);
        WasmEditor { harness }
    }

    /// Выполняет одну команду `{"action": ...}` и возвращает ответ
    pub fn dispatch(&mut self, json: &str) -> Result<String, JsError> {
        let response = execute_json(&mut self.harness, json).map_err(|e| {
            log_error(&e);
            JsError::new(&e)
        })?;
        if let Some(err) = &response.error {
            log_error(err);
        }
        serde_json::to_string(&response).map_err(|e| JsError::new(&e.to_string()))
    }

    /// Выполняет массив команд
    pub fn dispatch_batch(&mut self, json: &str) -> Result<String, JsError> {
        let responses = execute_json_batch(&mut self.harness, json).map_err(|e| {
            log_error(&e);
            JsError::new(&e)
        })?;
        serde_json::to_string(&responses).map_err(|e| JsError::new(&e.to_string()))
    }

    /// Обрабатывает нажатие клавиши (`code` из KeyboardEvent.code)
    pub fn key_down(&mut self, code: &str, ctrl: bool, shift: bool, alt: bool) -> bool {
        self.harness.press(Modifiers { ctrl, shift, alt }, code)
    }

    /// Возвращает текущую сцену в JSON
    pub fn export_scene(&self) -> Result<String, JsError> {
        self.harness
            .export_scene_json()
            .map_err(|e| JsError::new(&e.to_string()))
    }

    /// Загружает сцену из JSON (история и выделение сбрасываются)
    pub fn load_scene(&mut self, json: &str) -> Result<(), JsError> {
        self.harness.load_scene_json(json).map_err(|e| {
            let msg = e.to_string();
            log_error(&msg);
            JsError::new(&msg)
        })
    }

    pub fn can_undo(&self) -> bool {
        self.harness.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.harness.history.can_redo()
    }

    /// Версия сцены: растёт при каждом изменении
    pub fn version(&self) -> u64 {
        self.harness.scene().version()
    }
}

impl Default for WasmEditor {
    fn default() -> Self {
        Self::new()
    }
}
