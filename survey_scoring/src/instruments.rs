//! The instruments shipped with the library.
//!
//! The option labels, reversed question sets and scale compositions are
//! transcribed from the published instruments and must not be edited.

use crate::catalog::*;

pub const AGREEMENT_LABELS: [&str; 5] = [
    "Нет, это совсем не так",
    "Скорее нет, чем да",
    "Затрудняюсь ответить",
    "Скорее да, чем нет",
    "Да, совершенно верно",
];

pub fn agreement_scale() -> LikertScale {
    LikertScale::new(&AGREEMENT_LABELS)
}

pub const TEAM_QUESTION_COUNT: usize = 44;

const TEAM_REVERSED: [u32; 11] = [34, 35, 14, 26, 16, 28, 18, 30, 20, 21, 44];

/// Management team survey: 44 untitled questions, 11 scales.
pub fn team_questionnaire() -> Result<Questionnaire, CatalogError> {
    let scales = vec![
        Scale::new("Руководитель.Видение", &[12, 1, 23, 34]),
        Scale::new("Руководитель.Результативность", &[2, 13, 24, 35]),
        Scale::new("Руководитель.Системность", &[3, 25, 36, 14]),
        Scale::new("Руководитель.Квалификация", &[4, 37, 15, 26]),
        Scale::new("Руководитель.Ценности", &[5, 38, 27, 16]),
        Scale::new("Стратегия.Четкость", &[6, 17, 39, 28]),
        Scale::new("Организация.Полномочия-обязанности", &[7, 29, 40, 18]),
        Scale::new("Климат.Доверие", &[8, 19, 41, 30]),
        Scale::new("Климат.Настроение", &[9, 31, 42, 20]),
        Scale::new("Итоги.Достижение", &[10, 43, 32, 21]),
        Scale::new("Итоги.Удовлетворенность", &[11, 33, 22, 44]),
    ];
    likert_questionnaire(
        QuestionnaireHeader {
            id: "team".to_string(),
            name: "Опросник".to_string(),
            index: 0,
        },
        &base_questions(&[], TEAM_QUESTION_COUNT),
        &agreement_scale(),
        &TEAM_REVERSED,
        scales,
    )
}

pub const PERSONNEL_QUESTION_COUNT: usize = 112;

const PERSONNEL_REVERSED: [u32; 28] = [
    47, 49, 54, 57, 60, 63, 66, 67, 70, 71, 72, 78, 79, 81, 83, 84, 86, 87, 89, 90, 92, 93, 96,
    97, 101, 102, 104, 108,
];

const PERSONNEL_TITLES: [&str; PERSONNEL_QUESTION_COUNT] = [
    "У CEO нашей компании есть четкий план, который приведет нас к успеху",
    "Когда у нашей команды возникают сложности,  СEO - тот человек, который продолжает двигать команду к цели",
    "Наш лидер имеет успешный опыт работы в большой компании",
    "Состав нашей управленческой команды меняется очень редко",
    "Каждый член нашей управленческой команды имеет свою специализацию",
    "Мы почти никогда не привлекаем внешних экспертов для выполнения задач",
    "Все члены нашей управленческой команды отличаются инициативностью",
    "Я знаю поставленные перед компанией стратегические цели",
    "Я полностью согласен с поставленными перед компанией стратегическими целями",
    "В компании есть подробная, зафиксированная организационная структура",
    "Я не обязан согласовывать увольнение сотрудника из своего подразделения",
    "У меня и моих подчиненных есть четкие критерии эффективности выполнения задач",
    "И материальная, и нематериальная мотивация полностью меня устраивают",
    "Я бы хотел проработать в этой команде еще много лет",
    "На наших совещаниях можно задавать любые, даже «глупые» вопросы, и высказывать необычные идеи",
    "В управленческой команде есть негласные правила, которые все соблюдают",
    "Все члены нашей команды довольно приятные люди",
    "Наша команда с оптимизмом смотрит в будущее",
    "Я всегда заранее знаю о том, какие вопросы и задачи мы будем обсуждать на совещании",
    "Члены управленческой команды готовы поступиться своими интересами ради общего результата",
    "Процедура принятия управленческих решений прозрачна и понятна",
    "Решения в нашей управленческой команде принимаются консенсусом",
    "Корпоративная информация в нашей компании регулярно обновляется",
    "У меня есть свободный доступ к циркулирующей в компании информации",
    "Обратная связь поступает мне вовремя",
    "Я регулярно учусь и осваиваю новые навыки",
    "Все запланированные цели достигаются нашей командой",
    "Я удовлетворен своими результатами",
    "Наш CEO «горит» идеей построения крупной компании",
    "В ситуациях неопределенности CEO берет на себя ответственность и принимает решения, продвигающие нашу команду к цели",
    "Благодаря CEO в нашей компании все работает «как часы»",
    "Когда я начал заполнять этот тест, я сразу понял, о какой управленческой команде идет речь и кто в нее входит",
    "Можно сказать, что наша управленческая команда полностью укомплектована",
    "У всех членов управленческой команды есть большой опыт той работы, которую они делают сейчас",
    "В нашей управленческой команде нет «пассажиров»",
    "Каждый из нас знает, как его рабочие задачи влияют на ключевые цели, стоящие перед организацией",
    "Я уверен, что остальные члены управленческой команды полностью понимают цели, стоящие перед компанией",
    "Я знаю, кто из руководителей за что отвечает",
    "В своей зоне ответственности я сам принимаю все решения, ни с кем не советуясь",
    "Наш CEO регулярно контролирует своих подчиненных",
    "Мои коллеги не жалуются на свою мотивацию",
    "Я полностью доверяю мнению моих коллег по вопросам, касающимся их компетенции",
    "Можно сказать, что в нашей команде достаточно безопасная и комфортная атмосфера",
    "В нашей управленческой команде допустимо быть «не таким, как все»",
    "Даже, если в команде возникает спор, взаимная симпатия не позволяет ему перейти в конфликт",
    "Я всегда с удовольствием работаю",
    "Некоторые члены нашей команды до последнего придерживают информацию, даже если она необходима для решения проблемы",
    "Если будет необходимо, я буду работать до глубокой ночи и по выходным",
    "Порой мне совершенно непонятно, по какой причине принимается то или иное управленческое решение",
    "В нашей управленческой команде принято обсуждать решение до тех пор, пока все с ним не согласятся",
    "У нас есть полный массив корпоративной информации: о ситуации, планах, возможностях, ресурсах и инструментах, которыми владеет команда",
    "Мои коллеги всегда охотно делятся со мной рабочей информацией",
    "Мои коллеги умеют цивилизованно и деликатно предоставлять обратную связь",
    "Наша компания предпочитает не тратить время и деньги на обучение сотрудников",
    "Для меня важно сдавать свою работу вовремя",
    "Я доволен тем, как работают мои коллеги из управленческой команды",
    "На мой взгляд, планы нашего CEO недостаточно амбициозны и масштабны",
    "Фраза «человек, у которого слова не расходятся с делом» точно отражает нашего CEO",
    "Наш CEO способен эффективно распределять обязанности",
    "Я не уверен, что все члены управленческой команды хорошо знают друг друга",
    "Я считаю, что каждый член нашей управленческой команды, дополняет команду своими индивидуальными навыками",
    "Все члены управленческой команды являются экспертами в своих областях",
    "В нашей команде есть некоторые участники, которые стараются переложить с себя ответственность в сложных ситуациях",
    "Мы регулярно обсуждаем, как продвигаемся к ключевым целям",
    "На этапе планирования мое мнение учитывается",
    "У нас иногда возникают ситуации, когда непонятно кто должен нести ответственность и решать возникшую проблему",
    "Процесс согласования в нашей компании – это головная боль и уйма сил и времени",
    "Мы регулярно проводим встречи для понимания того, на каком этапе реализации своих целей находится каждый участник команды",
    "В нашей компании считается нормальным обсуждать систему мотивации",
    "Если возникает какая-то проблема, каждый старается найти виноватого",
    "Свои идеи я предпочитаю держать при себе, если они не совпадают с мнением большинства участников команды",
    "Я чувствую, что некоторые члены команды относятся ко мне с недостаточным уважением",
    "Члены управленческой команды испытывают симпатию друг к другу",
    "Как правило, общаясь с нашим CEO, я получаю настоящий заряд позитива и оптимизма",
    "Я стараюсь максимально собрать всю необходимую информацию перед совещанием",
    "Если нужно для общего результата - я окажу помощь коллеге, даже если это будет противоречить моим интересам",
    "С большой долей вероятности можно предсказать будущее решение СEO",
    "Большинство решений в нашей управленческой команде принимаются СEO",
    "Часть корпоративных документов в нашей компании, словно специально, написана так, чтобы никто ничего не понял",
    "Я всегда делюсь своими идеями с коллегами, если они об этом просят",
    "Мне очень сложно получить искреннюю обратную связь от коллег",
    "Я постоянно слежу за инновациями в нашей сфере",
    "Перенос дедлайнов – это норма в нашей компании",
    "Я не доволен результатами, которых добилась наша компания",
    "СEO нашей компании делится с нами видением от том, какой он хочет видеть компанию в будущем",
    "Иногда наш СEO сам не понимает, к какому результату он хочет привести нашу компанию",
    "Способность структурировать процессы – не самая сильная сторона нашего СEO",
    "С моей точки зрения, в нашей управленческой команде ровно столько людей, сколько необходимо для ее эффективной работы",
    "Если бы я был СEO, я бы изменил текущий состав нашей управленческой команды",
    "Иногда, некоторые члены управленческой команды не могут ответить на вопрос, явно относящийся к их зоне компетентности",
    "Большинство моих принципов и ценностей относительно работы совпадают с другими членами управленческой команды",
    "Иногда мне кажется, что мои задачи никак не связаны со стратегическими целями компании, а то и противоречат им",
    "Цели нашей компании, как правило, слишком амбициозны и, мне кажется, все понимают, что нам их не достичь в полной мере",
    "Когда у меня возникает какой-то вопрос не из моей зоны компетентности, я всегда знаю, к кому именно надо с ним обратиться",
    "У меня не бывает ситуаций, когда я чувствую, что не могу решить задачу по причине отсутствия необходимых полномочий",
    "Система отчетности – это не про нашу компанию",
    "Я считаю, что за ту работу, которую я делаю, я мог бы получать большее вознаграждение",
    "Про нашу команду можно сказать, что мы все в «одной лодке»",
    "В нашей команде люди заняты работой, а не «обороной»",
    "Я уважаю всех членов управленческой команды",
    "Честно говоря, некоторые члены нашей команды вызывают во мне неприязнь",
    "Некоторые члены нашей команды постоянно находятся в плохом настроении",
    "Мои коллеги всегда приходят на совещание с полной информацией по обсуждаемому вопросу",
    "Некоторые члены нашей управленческой команды не уступят своих полномочий и власти, даже если речь будет идти об общем результате компании",
    "Решения в управленческой команде принимаются по привычному сценарию",
    "Обсуждая задачи и проблемы, несогласие изучается, а не подавляется",
    "Вся корпоративная информация мне знакома и понятна",
    "В нашей компании лучше держать свои знания при себе",
    "Мы с коллегами регулярно даем друг другу обратную связь, как негативную, так и позитивную",
    "У меня хватает время на учебу",
    "Все члены нашей команды выполняют свои задачи качественно",
    "Я доволен работой нашего СEO",
];

/// Extended management survey: 112 titled questions, 28 scales.
pub fn personnel_questionnaire() -> Result<Questionnaire, CatalogError> {
    let titles: Vec<String> = PERSONNEL_TITLES.iter().map(|s| s.to_string()).collect();
    let scales = vec![
        Scale::new("Руководитель.Видение", &[29, 1, 85, 57]),
        Scale::new("Руководитель.Результативность", &[2, 30, 58, 86]),
        Scale::new("Руководитель.Системность", &[3]),
        Scale::new("Команда.Состав", &[4, 32, 88, 60]),
        Scale::new("Команда.Роли", &[5, 33, 61, 89]),
        Scale::new("Команда.Квалификация", &[6, 34, 62, 90]),
        Scale::new("Команда.Ценности", &[7, 35, 91, 63]),
        Scale::new("Стратегия.Четкость", &[8, 36, 64, 92]),
        Scale::new("Стратегия.Разделяемость", &[9, 37, 65, 93]),
        Scale::new("Организация.Обязанности-функция", &[10, 38, 94, 66]),
        Scale::new("Организация.Полномочия-обязанности", &[11, 39, 95, 67]),
        Scale::new("Организация.Контроль", &[40, 12, 68, 96]),
        Scale::new("Организация.Мотивация", &[13, 41, 69, 97]),
        Scale::new("Климат.Доверие", &[14, 42, 98, 70]),
        Scale::new("Климат.Безопасность", &[15, 43, 99, 71]),
        Scale::new("Климат.Уважение", &[16, 44, 72, 100]),
        Scale::new("Климат.Симпатия", &[17, 45, 73, 101]),
        Scale::new("Климат.Настроение", &[18, 46, 74, 102]),
        Scale::new("Процессы.Информация", &[19, 47, 75, 103]),
        Scale::new("Процессы.Общий результат", &[20, 48, 76, 104]),
        Scale::new("Процессы.Прозрачность решений", &[21, 77, 105, 49]),
        Scale::new("Процессы.Сотрудничество", &[22, 50, 106, 78]),
        Scale::new("Коммуникации.Актуальность информации", &[23, 51, 107, 79]),
        Scale::new("Коммуникации.Доступность информации", &[24, 52, 80, 108]),
        Scale::new("Коммуникации.Обратная связь", &[25, 53, 81, 109]),
        Scale::new("Развитие", &[26, 82, 110, 54]),
        Scale::new("Итоги.Достижение", &[27, 55, 83, 111]),
        Scale::new("Итоги.Удовлетворенность", &[28, 56, 112, 84]),
    ];
    likert_questionnaire(
        QuestionnaireHeader {
            id: "personnel".to_string(),
            name: "Опросник".to_string(),
            index: 0,
        },
        &base_questions(&titles, PERSONNEL_QUESTION_COUNT),
        &agreement_scale(),
        &PERSONNEL_REVERSED,
        scales,
    )
}
