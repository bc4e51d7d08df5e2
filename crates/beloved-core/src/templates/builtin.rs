//! Templates compiled into the binary

pub const MAIN_LUA: &str = r#"require 'includes'

function love.load()

end

function love.update(dt)

end

function love.draw()

end

function love.keypressed(key)
    if key == 'escape' then
        love.event.quit(0)
    end
end
"#;

pub const CONF_LUA: &str = r#"function love.conf(t)
    t.window.title = "{projectname}"
    t.window.width = 1280
    t.window.height = 720

    t.console = true
    t.window.resizable = true

    t.window.fullscreen = false
    t.window.vsync = 1
    t.window.msaa = 0
end
"#;

pub const CLASS_LUA: &str = r#"local {class_name} = {{}}
{class_name}.__index = {class_name}

function {class_name}:new()
    local self = {{

    }}

    setmetatable(self, {class_name})
    return self
end

return {class_name}
"#;

pub const INCLUDES_LUA: &str = "";

/// `(file name, template text)` pairs in registry order
pub const TEMPLATES: &[(&str, &str)] = &[
    ("main.lua", MAIN_LUA),
    ("conf.lua", CONF_LUA),
    ("class.lua", CLASS_LUA),
    ("includes.lua", INCLUDES_LUA),
];
