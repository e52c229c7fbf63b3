use std::sync::atomic::{AtomicU8, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lang {
    Ru,
    En,
}

impl Lang {
    /// Unknown codes fall back to Russian
    pub fn from_code(code: &str) -> Self {
        match code {
            "en" => Lang::En,
            _ => Lang::Ru,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Lang::Ru => "ru",
            Lang::En => "en",
        }
    }
}

static CURRENT_LANG: AtomicU8 = AtomicU8::new(0); // 0=Ru (default)

pub fn lang() -> Lang {
    match CURRENT_LANG.load(Ordering::Relaxed) {
        1 => Lang::En,
        _ => Lang::Ru,
    }
}

pub fn set_lang(l: Lang) {
    CURRENT_LANG.store(
        match l {
            Lang::Ru => 0,
            Lang::En => 1,
        },
        Ordering::Relaxed,
    );
}

/// Translate a key to the current language.
pub fn t(key: &str) -> &'static str {
    translate(key, lang())
}

pub fn translate(key: &str, l: Lang) -> &'static str {
    let ru = l == Lang::Ru;
    match key {
        // ── Menus ───────────────────────────────────────────
        "menu.file" => if ru { "Файл" } else { "File" },
        "menu.open" => if ru { "Открыть..." } else { "Open..." },
        "menu.open_title" => if ru { "Открыть JSON сцены" } else { "Open Scene JSON" },
        "menu.save" => if ru { "Сохранить..." } else { "Save..." },
        "menu.save_title" => if ru { "Сохранить JSON сцены" } else { "Save Scene JSON" },
        "menu.presets" => if ru { "Готовые сцены" } else { "Presets" },
        "menu.quit" => if ru { "Выход" } else { "Quit" },

        "menu.view" => if ru { "Вид" } else { "View" },
        "menu.reset_camera" => if ru { "Сбросить камеру  Esc" } else { "Reset camera  Esc" },
        "menu.animate" => if ru { "Анимация  P" } else { "Animate  P" },
        "menu.hud" => if ru { "Координаты камеры" } else { "Camera overlay" },
        "menu.language" => if ru { "Язык" } else { "Language" },

        // ── Side panel ──────────────────────────────────────
        "panel.scene" => if ru { "Сцена" } else { "Scene" },
        "panel.shapes" => if ru { "фигур" } else { "shapes" },
        "panel.nodes" => if ru { "узлов" } else { "nodes" },
        "panel.edges" => if ru { "рёбер" } else { "edges" },
        "panel.camera" => if ru { "Камера" } else { "Camera" },
        "panel.settings" => if ru { "Настройки" } else { "Settings" },
        "panel.keys" => if ru { "Управление" } else { "Controls" },

        "settings.move" => if ru { "Скорость" } else { "Move speed" },
        "settings.rotate" => if ru { "Поворот" } else { "Turn speed" },
        "settings.line_width" => if ru { "Толщина линий" } else { "Line width" },
        "settings.font_size" => if ru { "Размер шрифта" } else { "Font size" },
        "settings.bg_color" => if ru { "Цвет фона" } else { "Background color" },

        // ── Camera modes ────────────────────────────────────
        "mode.single" => if ru { "Вращение фигуры" } else { "Single shape" },
        "mode.free" => if ru { "Свободный полёт" } else { "Free flight" },
        "mode.fps" => if ru { "Ходьба" } else { "Walk" },

        // ── Key help ────────────────────────────────────────
        "help.forward_back" => if ru { "Вперёд / назад" } else { "Forward / back" },
        "help.left_right" => if ru { "Влево / вправо" } else { "Left / right" },
        "help.up_down" => if ru { "Вверх / вниз" } else { "Up / down" },
        "help.ana_kata" => if ru { "Ана / ката" } else { "Ana / kata" },
        "help.rotate" => if ru { "Поворот" } else { "Turn" },
        "help.shortcuts" => if ru {
            "Ctrl — вниз, мышь — обзор, Esc — сброс камеры"
        } else {
            "Ctrl moves down, drag to look, Esc resets the camera"
        },

        // ── Status bar ──────────────────────────────────────
        "status.segments" => if ru { "Отрезков" } else { "Segments" },
        "status.paused" => if ru { "Пауза" } else { "Paused" },

        // ── Fallback ────────────────────────────────────────
        _ => "???",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate() {
        assert_eq!(translate("menu.file", Lang::Ru), "Файл");
        assert_eq!(translate("menu.file", Lang::En), "File");
        assert_eq!(translate("no.such.key", Lang::En), "???");
    }

    #[test]
    fn test_lang_codes() {
        for l in [Lang::Ru, Lang::En] {
            assert_eq!(Lang::from_code(l.code()), l);
        }
        assert_eq!(Lang::from_code("de"), Lang::Ru);
    }
}
